use std::{collections::HashMap, sync::Arc};

use super::Command;

pub trait Module: Sync + Send + 'static {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn commands(&self) -> Arc<HashMap<String, Box<dyn Command>>>;
}
