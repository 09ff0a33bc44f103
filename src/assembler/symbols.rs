//! Symbol table for labels and data words.
//!
//! Entries keep the order in which they were first defined.
//! Redefining a name overwrites its value in place.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTableEntry {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or silently overwrites `name`.
    pub fn define(&mut self, name: &str, value: i64) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(SymbolTableEntry {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Overwrites an existing entry. Returns false when `name` is unknown.
    pub fn assign(&mut self, name: &str, value: i64) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.value = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolTableEntry> {
        self.entries.iter()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Symbol Table:")?;
        for entry in self.iter() {
            writeln!(f, "{} = {}", entry.name, entry.value)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        table.define("X", 10);
        table.define("LOOP", 3);
        assert_eq!(table.get("X"), Some(10));
        assert_eq!(table.get("LOOP"), Some(3));
        assert_eq!(table.get("Y"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = SymbolTable::new();
        table.define("var", 1);
        assert_eq!(table.get("var"), Some(1));
        assert_eq!(table.get("VAR"), None);
    }

    #[test]
    fn test_redefinition_keeps_position() {
        let mut table = SymbolTable::new();
        table.define("A", 1);
        table.define("B", 2);
        table.define("A", 3);
        let names: Vec<(&str, i64)> = table.iter().map(|e| (e.name.as_str(), e.value)).collect();
        assert_eq!(names, vec![("A", 3), ("B", 2)]);
    }

    #[test]
    fn test_assign() {
        let mut table = SymbolTable::new();
        table.define("A", 1);
        assert!(table.assign("A", 7));
        assert!(!table.assign("B", 7));
        assert_eq!(table.get("A"), Some(7));
        assert_eq!(table.get("B"), None);
    }

    #[test]
    fn test_display() {
        let mut table = SymbolTable::new();
        assert_eq!(table.to_string(), "Symbol Table:\n");
        table.define("X", 10);
        table.define("L", -2);
        assert_eq!(table.to_string(), "Symbol Table:\nX = 10\nL = -2\n");
    }
}
