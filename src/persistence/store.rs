use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entities::item::EntityId;
use crate::telemetry::logging;
use crate::world::waypoints::Waypoint;

const VARIABLES_FILE: &str = "variables.yaml";
const WAYPOINTS_FILE: &str = "waypoints.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct VariablesFile {
    #[serde(default)]
    variables: HashMap<String, u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WaypointsFile {
    #[serde(default)]
    waypoints: Vec<Waypoint>,
}

/// Profile-scoped save store for persistent script variables and
/// waypoints. Load failures degrade to an empty collection.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load_variables(&self) -> HashMap<String, EntityId> {
        let parsed: VariablesFile = self.load_yaml(VARIABLES_FILE);
        parsed
            .variables
            .into_iter()
            .map(|(name, id)| (name, EntityId(id)))
            .collect()
    }

    pub fn save_variables<'a>(
        &self,
        variables: impl Iterator<Item = (&'a String, EntityId)>,
    ) -> Result<(), String> {
        let file = VariablesFile {
            variables: variables
                .map(|(name, id)| (name.clone(), id.0))
                .collect(),
        };
        self.save_yaml(VARIABLES_FILE, &file)
    }

    pub fn load_waypoints(&self) -> Vec<Waypoint> {
        let parsed: WaypointsFile = self.load_yaml(WAYPOINTS_FILE);
        parsed.waypoints
    }

    pub fn save_waypoints(&self, waypoints: &[Waypoint]) -> Result<(), String> {
        let file = WaypointsFile {
            waypoints: waypoints.to_vec(),
        };
        self.save_yaml(WAYPOINTS_FILE, &file)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn load_yaml<T: Default + for<'de> Deserialize<'de>>(&self, name: &str) -> T {
        let path = self.path(name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                logging::log_error(&format!("read failed for {}: {}", path.display(), err));
                return T::default();
            }
        };
        match serde_yaml::from_str(&data) {
            Ok(parsed) => parsed,
            Err(err) => {
                logging::log_error(&format!("parse failed for {}: {}", path.display(), err));
                T::default()
            }
        }
    }

    /// Write to a sibling temp file first so a crash mid-write cannot
    /// truncate the previous save.
    fn save_yaml<T: Serialize>(&self, name: &str, value: &T) -> Result<(), String> {
        fs::create_dir_all(&self.root).map_err(|err| {
            format!("save dir create failed for {}: {}", self.root.display(), err)
        })?;
        let data = serde_yaml::to_string(value)
            .map_err(|err| format!("serialize failed for {}: {}", name, err))?;
        let path = self.path(name);
        let temp = self.path(&format!("{}.tmp", name));
        fs::write(&temp, data)
            .map_err(|err| format!("write failed for {}: {}", temp.display(), err))?;
        fs::rename(&temp, &path)
            .map_err(|err| format!("rename failed for {}: {}", path.display(), err))
    }
}

/// Convenience path helper shared by hosts: `<root>/profiles/<name>`.
pub fn profile_root(root: &Path, profile: &str) -> PathBuf {
    root.join("profiles").join(profile)
}
