use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use clap::Parser;
use env_logger::Builder;
use itertools::Itertools;
use log::{info, LevelFilter};

use bbrmgr::{
    BbrManager, BbrStatus, ConfigStore, Constants, Directory, FieldValues, FrrConfig, FrrError,
    StoreError, BBR_ROW_KEY, BGP_ASN_FIELD, DEVICE_METADATA_TABLE, LOCALHOST_KEY, STATUS_FIELD,
};

#[derive(Parser, Debug)]
#[clap(name = "bbrmgr", rename_all = "kebab-case")]
/// Render the BBR commands a toggle event would push to FRR
struct Args {
    /// Path to the static constants file (TOML)
    constants_path: String,
    /// Path to a dump of the FRR running configuration
    frr_config_path: String,
    /// Desired toggle status: enabled or disabled
    status: BbrStatus,
    /// Autonomous-system number for the router bgp header
    #[clap(long, default_value = "65100")]
    asn: String,
    /// Show debug logs (additive for trace logs)
    #[clap(short, parse(from_occurrences))]
    verbose: u8,
}

/// Reads the running config from a file dump; pushed batches and restart
/// requests go to stdout instead of a live daemon
struct FileFrr {
    path: String,
    text: Vec<String>,
}

impl FrrConfig for FileFrr {
    fn refresh(&mut self) -> Result<(), FrrError> {
        let contents = fs::read_to_string(&self.path)?;
        self.text = contents.lines().map(str::to_string).collect();
        Ok(())
    }

    fn lines(&self) -> Vec<String> {
        self.text.clone()
    }

    fn push(&mut self, lines: &[String]) -> Result<(), FrrError> {
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    fn restart_peer_groups(&mut self, groups: &[String]) -> Result<(), FrrError> {
        if !groups.is_empty() {
            println!("! restart peer-groups: {}", groups.iter().join(", "));
        }
        Ok(())
    }
}

/// The dry run has no live config store, so resolution always falls back to
/// the static defaults
struct NullStore;

impl ConfigStore for NullStore {
    fn get_row(&mut self, _table: &str, _key: &str) -> Result<Option<FieldValues>, StoreError> {
        Ok(None)
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let (bbrmgr_level, other_level) = match args.verbose {
        0 => (LevelFilter::Info, LevelFilter::Warn),
        1 => (LevelFilter::Debug, LevelFilter::Warn),
        2 => (LevelFilter::Trace, LevelFilter::Warn),
        _ => (LevelFilter::Trace, LevelFilter::Trace),
    };
    Builder::new()
        .filter(Some("bbrmgr"), bbrmgr_level)
        .filter(None, other_level)
        .init();

    let constants = Constants::from_file(&args.constants_path)?;

    let directory = Arc::new(Mutex::new(Directory::new()));
    directory
        .lock()
        .unwrap()
        .publish(DEVICE_METADATA_TABLE, LOCALHOST_KEY, BGP_ASN_FIELD, &args.asn);

    let frr = FileFrr {
        path: args.frr_config_path,
        text: Vec::new(),
    };
    let mut manager = BbrManager::new(&constants, &mut NullStore, Box::new(frr), directory);
    if !manager.feature_enabled() {
        info!("BBR is not enabled on this device; nothing to render");
        return Ok(());
    }

    let mut data = FieldValues::new();
    data.insert(STATUS_FIELD.to_string(), args.status.to_string());
    manager.handle_set(BBR_ROW_KEY, &data);

    Ok(())
}
