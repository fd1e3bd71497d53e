use crate::mda::MdaVideo;
use crate::peripheral::PeripheralHandle;

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use thiserror::Error;

// Host side of a module. Frontends get hold of the concrete device here so
// they can drive it beyond what the bus exposes.
pub trait Frontend {
    fn set_video_adapter(&mut self, _adapter: Arc<Mutex<MdaVideo>>) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleError {
    #[error("no module named \"{0}\"")]
    UnknownModule(String),
    #[error("malformed argument \"{0}\", expected key=value")]
    MalformedArgument(String),
    #[error("module {module} has no option \"{key}\"")]
    UnknownOption { module: &'static str, key: String },
    #[error("invalid seed \"{0}\"")]
    InvalidSeed(String),
}

pub type ModuleEntry = fn(Option<&mut dyn Frontend>, &str) -> Result<PeripheralHandle, ModuleError>;

pub const MODULES: &[(&str, ModuleEntry)] = &[
    ("mda", mda_create),
];

pub fn lookup(name: &str) -> Option<ModuleEntry> {
    MODULES.iter().find(|(n, _)| *n == name).map(|(_, entry)| *entry)
}

pub fn create(name: &str, frontend: Option<&mut dyn Frontend>, args: &str) -> Result<PeripheralHandle, ModuleError> {
    let entry = lookup(name).ok_or_else(|| ModuleError::UnknownModule(name.to_owned()))?;
    entry(frontend, args)
}

// Arguments are key=value pairs separated by commas and/or whitespace.
fn parse_args(args: &str) -> Result<Vec<(&str, &str)>, ModuleError> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|arg| !arg.is_empty())
        .map(|arg| {
            arg.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| ModuleError::MalformedArgument(arg.to_owned()))
        })
        .collect()
}

fn parse_u64(val: &str) -> Option<u64> {
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

////////////////////////////////////////////////////////////////////////////////

fn mda_create(frontend: Option<&mut dyn Frontend>, args: &str) -> Result<PeripheralHandle, ModuleError> {
    let mut seed = MdaVideo::DEFAULT_SEED;
    for (key, val) in parse_args(args)? {
        match key {
            "seed" => seed = parse_u64(val).ok_or_else(|| ModuleError::InvalidSeed(val.to_owned()))?,
            _ => {
                return Err(ModuleError::UnknownOption {
                    module: "mda",
                    key: key.to_owned(),
                })
            }
        }
    }

    debug!("mda: creating adapter with seed 0x{seed:x}");
    let adapter = Arc::new(Mutex::new(MdaVideo::with_seed(seed)));
    match frontend {
        Some(frontend) => frontend.set_video_adapter(adapter.clone()),
        None => warn!("mda: no frontend, nothing will display the adapter"),
    }
    Ok(adapter)
}
