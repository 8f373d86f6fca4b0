use std::io::Read;
use std::path::PathBuf;

use clap::{App, Arg};
use env_logger::Env;
use flate2::read::GzDecoder;
use log::{error, info};
use mcbe_nbt::{decode_with_opts, DecodeOpts, Payload, RootEnd, Trace};
use rayon::prelude::*;

//
// Dumps the NBT records in the given files (or stdin) as an indented listing
// of the decoded events, or as JSON. Needs the `cli` feature:
//
//     cargo run --features cli --bin nbt-dump -- level.dat
//

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Copy)]
struct Settings {
    gzip: bool,
    json: bool,
    opts: DecodeOpts,
}

enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_owned(),
            Source::File(path) => path.display().to_string(),
        }
    }

    fn read(&self, gzip: bool) -> Result<Vec<u8>> {
        let mut raw = vec![];
        match self {
            Source::Stdin => {
                std::io::stdin().read_to_end(&mut raw)?;
            }
            Source::File(path) => {
                raw = std::fs::read(path)?;
            }
        }

        if gzip {
            let mut data = vec![];
            GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
            Ok(data)
        } else {
            Ok(raw)
        }
    }
}

fn render_text(trace: &Trace) -> String {
    let mut out = String::new();

    for (depth, event) in trace.with_depth() {
        let indent = depth * 4;
        let name = match event.name {
            Some(name) => format!("{:?} ", name),
            None => String::new(),
        };
        let line = match event.payload {
            Payload::ByteArray(a) => format!("ByteArray({:?})", a.to_vec()),
            Payload::IntArray(a) => format!("IntArray({:?})", a.to_vec()),
            Payload::LongArray(a) => format!("LongArray({:?})", a.to_vec()),
            other => format!("{:?}", other),
        };
        out.push_str(&format!("{:indent$}{}{}\n", "", name, line, indent = indent));
    }

    out
}

fn render(trace: &Trace, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(trace.events())? + "\n")
    } else {
        Ok(render_text(trace))
    }
}

/// Decode one source, returning what to print and whether it decoded cleanly.
fn dump(source: &Source, settings: Settings) -> Result<(String, bool)> {
    let data = source.read(settings.gzip)?;
    info!("{}: {} bytes", source.label(), data.len());

    match decode_with_opts(&data, settings.opts) {
        Ok(trace) => {
            if trace.consumed() < data.len() {
                info!(
                    "{}: stopped at top level end tag, {} trailing bytes",
                    source.label(),
                    data.len() - trace.consumed()
                );
            }
            Ok((render(&trace, settings.json)?, true))
        }
        Err(partial) => {
            let mut out = render(partial.trace(), settings.json)?;
            out.push_str(&format!("error: {}\n", partial.error()));
            Ok((out, false))
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = App::new("nbt-dump")
        .about("Dump little-endian NBT records as a trace of tag events")
        .arg(
            Arg::with_name("files")
                .help("files to dump, reads stdin if none are given")
                .multiple(true),
        )
        .arg(
            Arg::with_name("gzip")
                .long("gzip")
                .short("z")
                .help("input is gzip compressed"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print events as JSON"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .help("maximum nesting of compounds and lists"),
        )
        .arg(
            Arg::with_name("lenient-root-end")
                .long("lenient-root-end")
                .help("stop at a top level end tag instead of failing"),
        )
        .get_matches();

    let mut opts = DecodeOpts::new();
    if let Some(depth) = matches.value_of("max-depth") {
        match depth.parse() {
            Ok(depth) => opts = opts.max_depth(depth),
            Err(e) => {
                error!("invalid --max-depth '{}': {}", depth, e);
                std::process::exit(2);
            }
        }
    }
    if matches.is_present("lenient-root-end") {
        opts = opts.root_end(RootEnd::Terminate);
    }

    let settings = Settings {
        gzip: matches.is_present("gzip"),
        json: matches.is_present("json"),
        opts,
    };

    let sources: Vec<Source> = match matches.values_of("files") {
        Some(files) => files.map(|f| Source::File(PathBuf::from(f))).collect(),
        None => vec![Source::Stdin],
    };

    let results: Vec<_> = sources
        .par_iter()
        .map(|source| (source, dump(source, settings)))
        .collect();

    let mut ok = true;
    let many = results.len() > 1;

    for (source, result) in results {
        match result {
            Ok((text, clean)) => {
                if many {
                    println!("== {}", source.label());
                }
                print!("{}", text);
                ok &= clean;
            }
            Err(e) => {
                error!("{}: {}", source.label(), e);
                ok = false;
            }
        }
    }

    if !ok {
        std::process::exit(1);
    }
}
