//! Privilege level tracking and graph-based navigation.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use regex::bytes::Regex;

use crate::error::{DriverError, Result};
use crate::platform::PrivilegeLevel;

/// Tracks the current privilege level and plans moves between levels.
///
/// Levels form an undirected graph through their `previous_priv` links;
/// moves follow the shortest path through it.
#[derive(Debug)]
pub struct PrivilegeManager {
    levels: IndexMap<String, PrivilegeLevel>,

    /// Adjacency list for the privilege graph.
    graph: HashMap<String, HashSet<String>>,

    current: Option<String>,
}

impl PrivilegeManager {
    pub fn new(levels: IndexMap<String, PrivilegeLevel>) -> Self {
        let mut graph: HashMap<String, HashSet<String>> = HashMap::new();
        for (name, level) in &levels {
            graph.entry(name.clone()).or_default();
            if let Some(ref parent) = level.previous_priv {
                graph.entry(name.clone()).or_default().insert(parent.clone());
                graph.entry(parent.clone()).or_default().insert(name.clone());
            }
        }

        Self {
            levels,
            graph,
            current: None,
        }
    }

    /// Determine the privilege level a prompt belongs to.
    pub fn determine_from_prompt(&self, prompt: &str) -> Result<&PrivilegeLevel> {
        self.levels
            .values()
            .find(|level| level.matches(prompt))
            .ok_or_else(|| {
                DriverError::UnknownPrivilege {
                    prompt: prompt.to_string(),
                }
                .into()
            })
    }

    /// Record the level the prompt shows, leaving the state alone for unknown prompts.
    pub fn update_from_prompt(&mut self, prompt: &str) {
        if let Ok(level) = self.determine_from_prompt(prompt) {
            self.current = Some(level.name.clone());
        }
    }

    pub fn current(&self) -> Option<&PrivilegeLevel> {
        self.current.as_ref().and_then(|name| self.levels.get(name))
    }

    /// Shortest path between two levels, both ends included.
    pub fn find_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        if from == to {
            return Ok(vec![from.to_string()]);
        }

        let mut queue = VecDeque::from([from.to_string()]);
        let mut parent: HashMap<String, String> = HashMap::new();
        let mut visited = HashSet::from([from.to_string()]);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![to.to_string()];
                let mut cursor = to;
                while let Some(prev) = parent.get(cursor) {
                    path.push(prev.clone());
                    cursor = prev.as_str();
                }
                path.reverse();
                return Ok(path);
            }

            for neighbor in self.graph.get(&node).into_iter().flatten() {
                if visited.insert(neighbor.clone()) {
                    parent.insert(neighbor.clone(), node.clone());
                    queue.push_back(neighbor.clone());
                }
            }
        }

        Err(DriverError::NoPrivilegePath {
            from: from.to_string(),
            to: to.to_string(),
        }
        .into())
    }

    /// How to escalate from `from` to its child level `to`.
    ///
    /// Sessions only ever move up, so there is no step back down.
    pub fn get_transition(&self, from: &str, to: &str) -> Option<TransitionInfo> {
        let to_level = self.levels.get(to)?;
        if to_level.previous_priv.as_deref() != Some(from) {
            return None;
        }

        Some(TransitionInfo {
            command: to_level.escalate_command.clone()?,
            auth_prompt: to_level.escalate_prompt.clone(),
        })
    }
}

/// A single step between adjacent privilege levels.
#[derive(Debug, Clone)]
pub struct TransitionInfo {
    pub command: String,

    /// Password prompt to answer after sending `command`; `None` if no auth.
    pub auth_prompt: Option<Regex>,
}
