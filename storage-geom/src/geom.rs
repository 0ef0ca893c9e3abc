// SPDX-License-Identifier: GPL-3.0-only

//! FreeBSD GEOM adapter
//!
//! The kernel exports the full GEOM mesh as XML through the
//! `kern.geom.confxml` sysctl, the same document `libgeom` parses:
//!
//! ```text
//! <mesh>
//!   <class><name>DISK</name>
//!     <geom><name>da0</name>
//!       <provider><name>da0</name><mediasize>..</mediasize><sectorsize>512</sectorsize>
//!         <config>..</config>
//!       </provider>
//!     </geom>
//!   </class>
//!   <class><name>PART</name>
//!     <geom><name>da0</name>
//!       <consumer>..</consumer>
//!       <provider><name>da0p1</name>..<config><start>40</start><type>freebsd-ufs</type>..</config></provider>
//!     </geom>
//!   </class>
//! </mesh>
//! ```
//!
//! Only class, geom and provider nodes are kept; consumers are skipped.

use std::process::Command;

use quick_xml::Reader;
use quick_xml::events::Event;
use storage_types::{DiskRecord, PartitionRecord};

use crate::{Result, TopologyError, TopologyProvider};

const CONFXML_OID: &str = "kern.geom.confxml";
const DISK_CLASS: &str = "DISK";
const PART_CLASS: &str = "PART";

/// Parsed GEOM mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeomTree {
    pub classes: Vec<GeomClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeomClass {
    pub name: String,
    pub geoms: Vec<Geom>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geom {
    pub name: String,
    pub providers: Vec<GeomProvider>,
}

/// A provider node (a device the geom exports)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeomProvider {
    pub name: String,
    pub mediasize: u64,
    pub sectorsize: u64,
    pub config: Vec<(String, String)>,
}

impl GeomTree {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut tree = GeomTree::default();
        let mut stack: Vec<String> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    tree.open(&stack, &name);
                    stack.push(name);
                }
                Ok(Event::Empty(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    tree.open(&stack, &name);
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| TopologyError::Xml(e.to_string()))?;
                    tree.text(&stack, &text);
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(TopologyError::Xml(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(tree)
    }

    pub fn class(&self, name: &str) -> Option<&GeomClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    fn open(&mut self, stack: &[String], element: &str) {
        let path: Vec<&str> = stack.iter().map(String::as_str).collect();
        match (path.as_slice(), element) {
            ([.., "mesh"], "class") => self.classes.push(GeomClass::default()),
            ([.., "mesh", "class"], "geom") => {
                if let Some(class) = self.classes.last_mut() {
                    class.geoms.push(Geom::default());
                }
            }
            ([.., "class", "geom"], "provider") => {
                if let Some(geom) = self.current_geom() {
                    geom.providers.push(GeomProvider::default());
                }
            }
            ([.., "geom", "provider", "config"], key) => {
                if let Some(provider) = self.current_provider() {
                    provider.config.push((key.to_string(), String::new()));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, stack: &[String], text: &str) {
        let path: Vec<&str> = stack.iter().map(String::as_str).collect();
        match path.as_slice() {
            [.., "mesh", "class", "name"] => {
                if let Some(class) = self.classes.last_mut() {
                    class.name = text.to_string();
                }
            }
            [.., "class", "geom", "name"] => {
                if let Some(geom) = self.current_geom() {
                    geom.name = text.to_string();
                }
            }
            [.., "geom", "provider", "name"] => {
                if let Some(provider) = self.current_provider() {
                    provider.name = text.to_string();
                }
            }
            [.., "geom", "provider", "mediasize"] => {
                if let Some(provider) = self.current_provider() {
                    provider.mediasize = text.trim().parse().unwrap_or(0);
                }
            }
            [.., "geom", "provider", "sectorsize"] => {
                if let Some(provider) = self.current_provider() {
                    provider.sectorsize = text.trim().parse().unwrap_or(0);
                }
            }
            [.., "geom", "provider", "config", _] => {
                if let Some((_, value)) = self
                    .current_provider()
                    .and_then(|provider| provider.config.last_mut())
                {
                    value.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn current_geom(&mut self) -> Option<&mut Geom> {
        self.classes.last_mut()?.geoms.last_mut()
    }

    fn current_provider(&mut self) -> Option<&mut GeomProvider> {
        self.current_geom()?.providers.last_mut()
    }
}

#[derive(Debug, Clone)]
enum TreeSource {
    Sysctl,
    Xml(String),
}

/// Topology provider backed by the FreeBSD GEOM mesh
#[derive(Debug, Clone)]
pub struct GeomTopology {
    source: TreeSource,
}

impl Default for GeomTopology {
    fn default() -> Self {
        Self::new()
    }
}

impl GeomTopology {
    /// Read the live mesh from the kernel on every query
    pub fn new() -> Self {
        Self {
            source: TreeSource::Sysctl,
        }
    }

    /// Use a previously captured `kern.geom.confxml` document
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self {
            source: TreeSource::Xml(xml.into()),
        }
    }

    fn tree(&self) -> Result<GeomTree> {
        match &self.source {
            TreeSource::Sysctl => GeomTree::parse(&read_confxml()?),
            TreeSource::Xml(xml) => GeomTree::parse(xml),
        }
    }
}

fn read_confxml() -> Result<String> {
    let sysctl = which::which("sysctl")
        .map_err(|e| TopologyError::Unavailable(format!("sysctl not found: {e}")))?;

    let output = Command::new(sysctl).args(["-n", CONFXML_OID]).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TopologyError::Unavailable(format!(
            "sysctl {CONFXML_OID} failed: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl TopologyProvider for GeomTopology {
    fn name(&self) -> &'static str {
        "geom"
    }

    fn list_disks(&self) -> Result<Vec<DiskRecord>> {
        let tree = self.tree()?;
        let Some(class) = tree.class(DISK_CLASS) else {
            tracing::debug!("GEOM mesh has no {DISK_CLASS} class");
            return Ok(Vec::new());
        };

        Ok(class
            .geoms
            .iter()
            .flat_map(|geom| &geom.providers)
            .map(|provider| DiskRecord {
                name: provider.name.clone(),
                size: provider.mediasize,
                sector_size: provider.sectorsize,
            })
            .collect())
    }

    fn list_partitions(&self, disk: &str) -> Result<Vec<PartitionRecord>> {
        let tree = self.tree()?;
        let Some(class) = tree.class(PART_CLASS) else {
            return Ok(Vec::new());
        };

        Ok(class
            .geoms
            .iter()
            .filter(|geom| geom.name == disk)
            .flat_map(|geom| &geom.providers)
            .map(|provider| PartitionRecord {
                name: provider.name.clone(),
                size: provider.mediasize,
                config: provider.config.clone(),
            })
            .collect())
    }
}
