//! Serializable form of a ray.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Ray;
use crate::Result;

/// A ray as two ordered coordinate triples.
///
/// An absent tip is written as a copy of `p1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RayRecord {
    pub p1: [f64; 3],
    pub p2: [f64; 3],
}

impl From<&Ray> for RayRecord {
    fn from(ray: &Ray) -> Self {
        let (p1, p2) = (ray.p1(), ray.p2());
        Self {
            p1: [p1.x, p1.y, p1.z],
            p2: [p2.x, p2.y, p2.z],
        }
    }
}

impl From<Ray> for RayRecord {
    fn from(ray: Ray) -> Self {
        Self::from(&ray)
    }
}

impl From<RayRecord> for Ray {
    fn from(record: RayRecord) -> Self {
        Ray::new(Point3::from(record.p1), Point3::from(record.p2))
    }
}

impl Ray {
    /// Snapshot of the endpoints as plain arrays.
    #[inline]
    pub fn to_record(&self) -> RayRecord {
        RayRecord::from(self)
    }

    /// Structured JSON form: `{"p1": [x, y, z], "p2": [x, y, z]}`.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_record())?)
    }

    /// Reads a ray back from [`Ray::to_json`] output.
    pub fn from_json(value: &Value) -> Result<Ray> {
        let record: RayRecord = serde_json::from_value(value.clone())?;
        Ok(record.into())
    }
}
