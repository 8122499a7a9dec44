use std::collections::HashMap;

/// Where a label was defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelSite {
    pub addr: u16,
    pub lineno: u32,
}

/// Symbol table for one assembly. Definition order is preserved for the
/// object file's label section.
#[derive(Default)]
pub struct LabelTable {
    map: HashMap<String, LabelSite>,
    order: Vec<String>,
}

impl LabelTable {
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    /// Registers a definition; a second definition of the same name reports
    /// the line of the first.
    pub fn define(&mut self, name: &str, addr: u16, lineno: u32) -> Result<(), u32> {
        if let Some(existing) = self.map.get(name) {
            return Err(existing.lineno);
        }
        self.map.insert(name.to_string(), LabelSite { addr, lineno });
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.map.get(name).map(|site| site.addr)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelSite)> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.map[name]))
    }
}
