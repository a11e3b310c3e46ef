use std::{collections::HashMap, sync::Arc};

use crate::{Command, Module};

use super::globalban::CmdGlobalBan;

pub struct ModModeration(Arc<HashMap<String, Box<dyn Command>>>);

impl Default for ModModeration {
    fn default() -> Self {
        Self::new()
    }
}

impl ModModeration {
    pub fn new() -> Self {
        let mut map = HashMap::new();

        {
            let cmd: Box<dyn Command> = Box::new(CmdGlobalBan);
            map.insert(cmd.name().to_string(), cmd);
        }

        Self(Arc::new(map))
    }
}

impl Module for ModModeration {
    fn name(&self) -> &str {
        "moderation"
    }

    fn description(&self) -> &str {
        "Moderation actions spanning every server the bot is in."
    }

    fn commands(&self) -> Arc<HashMap<String, Box<dyn Command>>> {
        self.0.clone()
    }
}
