//! Punto de entrada ("driver").
//!
//! Este módulo orquesta las fases del proceso de traducción y expone
//! una CLI: carga del programa fuente, verificación sintáctica y
//! emisión del artefacto de salida para el objetivo elegido.

use anyhow::{self, Context};
use bfcc::{
    syntax::{self, SyntaxOptions},
    target::{self, Backend},
};
use clap::{self, crate_version, Arg};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    str::FromStr,
};

fn main() -> anyhow::Result<()> {
    // Parsing de CLI
    let args = clap::App::new("Brainfuck cross-compiler")
        .version(crate_version!())
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .value_name("TARGET")
                .takes_value(true)
                .default_value("c")
                .possible_values(&["c", "i386", "mips"])
                .help("Output dialect"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject badly nested loops instead of only unbalanced counts"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .takes_value(true)
                .value_name("FILE")
                .help("Output file ('-' for stdout)"),
        )
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .required(true)
                .help("Brainfuck source file"),
        )
        .get_matches();

    // Se extraen argumentos necesarios
    let backend = args.value_of("target").unwrap();
    let backend = Backend::from_str(backend).expect("main.rs allowed a bad target");
    let input = args.value_of("input").unwrap();
    let output = args
        .value_of("output")
        .unwrap_or_else(|| backend.default_output());

    let source =
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?;

    // La verificación ocurre antes de crear cualquier artefacto de salida
    let mut options = SyntaxOptions::empty();
    if args.is_present("strict") {
        options |= SyntaxOptions::STRICT_NESTING;
    }

    syntax::check(&source, options).context("Syntax check failed")?;

    match output {
        // Salida a stdout
        "-" => {
            let stdout = io::stdout();
            target::emit(&source, backend, &mut stdout.lock())
                .context("Failed to emit to stdout")?;
        }

        // Salida a archivo
        path => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open for writing: {}", path))?;

            let mut file = BufWriter::new(file);
            target::emit(&source, backend, &mut file)
                .with_context(|| format!("Failed to emit to file: {}", path))?;

            file.flush()
                .with_context(|| format!("Failed to flush output file: {}", path))?;
        }
    };

    Ok(())
}
