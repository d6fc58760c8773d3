use crate::commands::{CmdMessage, CmdResult};
use crate::config::TaptalkConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Get(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = TaptalkConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::Show => {
            for key in TaptalkConfig::KEYS {
                result.config.push((key.to_string(), config.get(key)?));
            }
        }
        ConfigAction::Get(key) => {
            let value = config.get(&key)?;
            result.config.push((key, value));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(data_dir)?;
            result.add_message(CmdMessage::success(format!("{} updated", key)));
        }
    }

    Ok(result)
}
