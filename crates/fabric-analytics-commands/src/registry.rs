use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::command::{CommandMetadata, DiagnoseNotebookCommand, Handler, OptimizePipelineCommand, WorkspaceHealthCommand};

/// A command as listed by [`CommandGroup::describe`], addressed by its full path
#[derive(Serialize, Clone, Debug)]
pub struct CommandDescription {
    pub path: String,
    #[serde(flatten)]
    pub metadata: CommandMetadata,
}

/// Named tree of commands. A command is addressed by the names of the groups leading to it
/// followed by its own name, relative to the group it is looked up from.
#[derive(Clone)]
pub struct CommandGroup {
    name: String,
    groups: BTreeMap<String, CommandGroup>,
    commands: BTreeMap<String, Arc<dyn Handler>>,
}

impl CommandGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: BTreeMap::new(),
            commands: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: CommandGroup) -> Self {
        self.groups.insert(group.name.clone(), group);
        self
    }

    pub fn with_command<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.commands.insert(handler.metadata().name.to_string(), Arc::new(handler));
        self
    }

    /// Looks a command up by its whitespace separated path, e.g. `workspace health`
    pub fn find(&self, path: &str) -> Option<Arc<dyn Handler>> {
        let segments: Vec<&str> = path.split_whitespace().collect();
        let (name, groups) = segments.split_last()?;

        let mut group = self;
        for segment in groups {
            group = group.groups.get(*segment)?;
        }

        group.commands.get(*name).cloned()
    }

    pub fn describe(&self) -> Vec<CommandDescription> {
        let mut descriptions = vec![];
        self.collect("", &mut descriptions);
        descriptions
    }

    fn collect(&self, prefix: &str, descriptions: &mut Vec<CommandDescription>) {
        for (name, handler) in &self.commands {
            descriptions.push(CommandDescription {
                path: join(prefix, name),
                metadata: handler.metadata(),
            });
        }

        for (name, group) in &self.groups {
            group.collect(&join(prefix, name), descriptions);
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", prefix, name)
    }
}

/// Every analytics command, registered explicitly
pub fn analytics() -> CommandGroup {
    CommandGroup::new("analytics")
        .with_group(CommandGroup::new("workspace").with_command(WorkspaceHealthCommand))
        .with_group(CommandGroup::new("pipeline").with_command(OptimizePipelineCommand))
        .with_group(CommandGroup::new("notebook").with_command(DiagnoseNotebookCommand))
}
