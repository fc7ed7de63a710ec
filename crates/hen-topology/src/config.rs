use crate::geom::{Point, point};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Editor settings. Every field has a default so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub node_radius: f64,
    pub interface_radius: f64,
    /// Where freshly created nodes are dropped on the canvas.
    pub node_center: CenterConfig,
    /// Whether a malformed CIDR during node creation wipes the canvas.
    pub clear_canvas_on_invalid_cidr: bool,
    /// Initial profile pool (ids of hosts that can be placed).
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    pub x: f64,
    pub y: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_radius: 18.0,
            interface_radius: 4.0,
            node_center: CenterConfig { x: 30.0, y: 30.0 },
            clear_canvas_on_invalid_cidr: true,
            candidates: Vec::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_value(value: Value) -> Result<Self> {
        let cfg: Self = serde_json::from_value(value).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.node_radius,
            self.interface_radius,
            self.node_center.x,
            self.node_center.y,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidConfig {
                message: "radii and node center must be finite numbers".to_string(),
            });
        }
        if self.interface_radius <= 0.0 || self.interface_radius >= self.node_radius {
            return Err(Error::InvalidConfig {
                message: format!(
                    "interfaceRadius ({}) must be positive and smaller than nodeRadius ({})",
                    self.interface_radius, self.node_radius
                ),
            });
        }
        Ok(())
    }

    pub fn node_center(&self) -> Point {
        point(self.node_center.x, self.node_center.y)
    }

    /// Distance from a node's center to the center of each of its interfaces.
    pub fn interface_orbit(&self) -> f64 {
        self.node_radius - self.interface_radius
    }
}
