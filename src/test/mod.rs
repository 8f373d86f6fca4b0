use std::convert::TryFrom;

use crate::Tag;

pub mod builder;
mod input;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8).unwrap(), Tag::$tag);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn element_widths() {
    assert_eq!(Tag::Byte.element_width(), Some(1));
    assert_eq!(Tag::Short.element_width(), Some(2));
    assert_eq!(Tag::Float.element_width(), Some(4));
    assert_eq!(Tag::LongArray.element_width(), Some(8));
    assert_eq!(Tag::String.element_width(), None);
    assert_eq!(Tag::Compound.element_width(), None);
}
