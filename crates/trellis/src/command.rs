//! Per-view command registry and key bindings.
//!
//! Commands are named closures a view registers for itself. Key bindings map a
//! normalised keystroke to a command name. Lookup is all the core does; input
//! decoding and dispatch policy live with the application.

use std::{collections::HashMap, fmt};

use crate::{
    error::{Error, Result},
    id::ViewId,
    key::Key,
};

/// A command handler. Receives the id of the view it was invoked on and
/// returns whether the command was handled.
pub type CommandFn = Box<dyn FnMut(ViewId) -> bool>;

/// Commands and bindings for one view.
#[derive(Default)]
pub struct CommandSet {
    /// Handlers by name.
    commands: HashMap<String, CommandFn>,
    /// Command names by normalised key.
    bindings: HashMap<Key, String>,
}

impl CommandSet {
    /// Register or replace a command.
    pub fn add(&mut self, name: &str, f: CommandFn) {
        self.commands.insert(name.to_string(), f);
    }

    /// Is a command with this name registered?
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// Run a command.
    pub fn invoke(&mut self, view: ViewId, name: &str) -> Result<bool> {
        let f = self
            .commands
            .get_mut(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        Ok(f(view))
    }

    /// Bind a key to a command name. The command need not exist yet; an
    /// unknown name surfaces when the key is invoked.
    pub fn bind(&mut self, key: impl Into<Key>, name: &str) {
        self.bindings.insert(key.into().normalize(), name.to_string());
    }

    /// The command bound to a key, if any.
    pub fn binding(&self, key: impl Into<Key>) -> Option<&str> {
        self.bindings
            .get(&key.into().normalize())
            .map(String::as_str)
    }

    /// Run the command bound to `key`. Returns `Ok(None)` if nothing is bound.
    pub fn invoke_key(&mut self, view: ViewId, key: impl Into<Key>) -> Result<Option<bool>> {
        let Some(name) = self.binding(key).map(str::to_string) else {
            return Ok(None);
        };
        self.invoke(view, &name).map(Some)
    }
}

impl fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSet")
            .field("commands", &self.names())
            .field("bindings", &self.bindings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use slotmap::SlotMap;

    use super::*;
    use crate::key::{Ctrl, KeyCode, Shift};

    #[test]
    fn invoke_and_bind() -> Result<()> {
        let mut ids: SlotMap<ViewId, ()> = SlotMap::with_key();
        let v = ids.insert(());
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();

        let mut c = CommandSet::default();
        c.add(
            "scroll_down",
            Box::new(move |_| {
                h.set(h.get() + 1);
                true
            }),
        );
        c.add("noop", Box::new(|_| false));
        assert_eq!(c.names(), vec!["noop", "scroll_down"]);

        assert!(c.invoke(v, "scroll_down")?);
        assert!(!c.invoke(v, "noop")?);
        assert_eq!(
            c.invoke(v, "missing"),
            Err(Error::UnknownCommand("missing".into()))
        );

        c.bind(KeyCode::Down, "scroll_down");
        c.bind(Shift + 'j', "scroll_down");
        c.bind(Ctrl + 'q', "quit");
        assert_eq!(c.invoke_key(v, KeyCode::Down)?, Some(true));
        assert_eq!(c.invoke_key(v, 'J')?, Some(true));
        assert_eq!(c.invoke_key(v, 'x')?, None);
        assert!(c.invoke_key(v, Ctrl + 'q').is_err());
        assert_eq!(hits.get(), 3);
        Ok(())
    }
}
