use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use markit::{Config, RenderOptions, parse_bytes, render};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = markit::config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Parse { file, json } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let input = read_all(file.as_ref())?;
            let tokens = parse_bytes(&input, &cfg);

            if json {
                serde_json::to_writer_pretty(&mut stdout, &tokens).map_err(io::Error::other)?;
                writeln!(stdout)?;
            } else {
                writeln!(stdout, "{:#?}", tokens)?;
            }
            Ok(())
        }
        Commands::Render {
            file,
            xhtml,
            breaks,
            nofollow,
            lang_prefix,
        } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let input = read_all(file.as_ref())?;
            let tokens = parse_bytes(&input, &cfg);

            let options = RenderOptions {
                xhtml,
                breaks,
                lang_prefix,
                nofollow,
            };
            stdout.write_all(render(&tokens, &options).as_bytes())?;
            Ok(())
        }
    }
}
