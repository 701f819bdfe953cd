// src/bin/cli.rs
use color_eyre::eyre::{Result, bail};

use hosp_scrape::cli::{self, Command};

fn main() -> Result<()> {
    color_eyre::install()?;

    let params = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", cli::HELP);
            return Ok(());
        }
        Command::Run(p) => p,
    };

    if let Err(e) = hosp_scrape::logger::init(cli::log_file(&params), cli::log_level(&params)) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let reports = cli::run(&params)?;
    for r in &reports {
        println!("{r}");
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        bail!("{failed} export(s) failed");
    }
    Ok(())
}
