use std::{collections::HashMap, sync::Arc};

use crate::{Command, Module};

use super::ping::CmdPing;

pub struct ModCore(Arc<HashMap<String, Box<dyn Command>>>);

impl Default for ModCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModCore {
    pub fn new() -> Self {
        let mut map = HashMap::new();

        {
            let cmd: Box<dyn Command> = Box::new(CmdPing);
            map.insert(cmd.name().to_string(), cmd);
        }

        Self(Arc::new(map))
    }
}

impl Module for ModCore {
    fn name(&self) -> &str {
        "core"
    }

    fn description(&self) -> &str {
        "Core service commands."
    }

    fn commands(&self) -> Arc<HashMap<String, Box<dyn Command>>> {
        self.0.clone()
    }
}
