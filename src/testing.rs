//! Test and demo doubles
//!
//! In-memory stand-ins for the two external collaborators: the catalog
//! service (`MockCatalog`) and the camera (`MockCamera`), plus small
//! fixture helpers. Integration tests and the bundled demo wire the real
//! controller against these, which is why this module is not test-gated.

use crate::api::{ApiError, CatalogClient, Creature, QueryParams};
use crate::scan::camera::{CameraDevice, CameraError, CameraStream};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a minimal entry for fixtures
#[must_use]
pub fn creature(id: i64, name: &str) -> Creature {
    Creature {
        id,
        name: name.to_string(),
        scientific_name: format!("{name}us testus"),
        description: format!("A specimen of {name}."),
        gender_ratio: 0.5,
        kingdom: "Animalia".to_string(),
        classification: "Mammal".to_string(),
        family: "Testidae".to_string(),
        body_shape: "quadruped".to_string(),
        height: 1.0,
        weight: 10.0,
        image_path: format!("uploads/{id}.png"),
    }
}

/// Write a solid-color PNG for upload fixtures
///
/// # Panics
///
/// Panics if the file cannot be written; fixtures fail loudly.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 60, 60]));
    img.save(path).expect("failed to write test image");
}

/// In-memory catalog service
///
/// Serves a mutable entry list, filters searches the way the real
/// service does, and registers identified creatures. Failures are
/// scripted with [`MockCatalog::fail_next`].
pub struct MockCatalog {
    entries: Mutex<Vec<Creature>>,
    fail_next: Mutex<Option<String>>,
    identify_as: Mutex<Option<Creature>>,
}

impl MockCatalog {
    #[must_use]
    pub fn with_entries(entries: Vec<Creature>) -> Self {
        Self {
            entries: Mutex::new(entries),
            fail_next: Mutex::new(None),
            identify_as: Mutex::new(None),
        }
    }

    /// Fail the next call (list, search, or identify) with `detail`
    pub fn fail_next(&self, detail: &str) {
        *self.fail_next.lock().unwrap() = Some(detail.to_string());
    }

    /// Script the creature the next identify will resolve to
    pub fn identify_as(&self, creature: Creature) {
        *self.identify_as.lock().unwrap() = Some(creature);
    }

    /// Snapshot of the current entry list
    #[must_use]
    pub fn entries(&self) -> Vec<Creature> {
        self.entries.lock().unwrap().clone()
    }

    fn take_failure(&self) -> Option<ApiError> {
        self.fail_next
            .lock()
            .unwrap()
            .take()
            .map(|detail| ApiError::Status { status: 503, detail })
    }

    fn matches(entry: &Creature, params: &QueryParams) -> bool {
        for (name, value) in params {
            let ok = match *name {
                "id" => value.parse::<i64>().is_ok_and(|id| id == entry.id),
                "name" => entry.name.eq_ignore_ascii_case(value),
                "scientific_name" => entry.scientific_name.eq_ignore_ascii_case(value),
                "kingdom" => entry.kingdom.eq_ignore_ascii_case(value),
                "classification" => entry.classification.eq_ignore_ascii_case(value),
                "family" => entry.family.eq_ignore_ascii_case(value),
                "body_shape" => entry.body_shape.eq_ignore_ascii_case(value),
                "height_min" => value.parse().is_ok_and(|min: f64| entry.height >= min),
                "height_max" => value.parse().is_ok_and(|max: f64| entry.height <= max),
                "weight_min" => value.parse().is_ok_and(|min: f64| entry.weight >= min),
                "weight_max" => value.parse().is_ok_and(|max: f64| entry.weight <= max),
                "gender_ratio_min" => value.parse().is_ok_and(|min: f64| entry.gender_ratio >= min),
                "gender_ratio_max" => value.parse().is_ok_and(|max: f64| entry.gender_ratio <= max),
                _ => true,
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

impl CatalogClient for MockCatalog {
    fn list(&self) -> Result<Vec<Creature>, ApiError> {
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        Ok(self.entries())
    }

    fn search(&self, params: &QueryParams) -> Result<Vec<Creature>, ApiError> {
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        Ok(self
            .entries()
            .into_iter()
            .filter(|entry| Self::matches(entry, params))
            .collect())
    }

    fn identify(&self, png: Vec<u8>, _file_name: &str) -> Result<Creature, ApiError> {
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        if png.is_empty() {
            return Err(ApiError::Status {
                status: 422,
                detail: "File must be an image".to_string(),
            });
        }

        let mut entries = self.entries.lock().unwrap();
        let identified = self.identify_as.lock().unwrap().take().unwrap_or_else(|| {
            let next_id = entries.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            creature(next_id, "Identified")
        });

        // The real service registers the identified creature, so a
        // subsequent list includes it.
        if !entries.iter().any(|c| c.id == identified.id) {
            entries.push(identified.clone());
        }
        Ok(identified)
    }
}

/// Camera double that counts live streams
///
/// A stream increments the counter when opened and decrements it on
/// drop, so tests can assert the resource-release invariant directly.
pub struct MockCamera {
    deny: bool,
    frame_size: (u32, u32),
    live: Arc<AtomicUsize>,
}

impl MockCamera {
    /// A granting camera serving 240x240 frames
    #[must_use]
    pub fn new() -> Self {
        Self::with_frame_size(240, 240)
    }

    #[must_use]
    pub fn with_frame_size(width: u32, height: u32) -> Self {
        Self {
            deny: false,
            frame_size: (width, height),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A camera whose every open is refused
    #[must_use]
    pub fn denying() -> Self {
        Self {
            deny: true,
            frame_size: (0, 0),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of streams currently open
    #[must_use]
    pub fn live_streams(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for MockCamera {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        if self.deny {
            return Err(CameraError::AccessDenied("permission denied".to_string()));
        }

        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockStream {
            frame_size: self.frame_size,
            live: Arc::clone(&self.live),
        }))
    }
}

struct MockStream {
    frame_size: (u32, u32),
    live: Arc<AtomicUsize>,
}

impl CameraStream for MockStream {
    fn frame(&mut self) -> Result<DynamicImage, CameraError> {
        let (w, h) = self.frame_size;
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            w,
            h,
            Rgb([80, 120, 200]),
        )))
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_search_by_name() {
        let catalog = MockCatalog::with_entries(vec![creature(1, "Koala"), creature(2, "Emu")]);

        let mut params = QueryParams::new();
        params.push("name", "koala".to_string());

        let found = catalog.search(&params).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_mock_catalog_search_by_range() {
        let mut tall = creature(1, "Emu");
        tall.height = 1.9;
        let mut short = creature(2, "Koala");
        short.height = 0.7;
        let catalog = MockCatalog::with_entries(vec![tall, short]);

        let mut params = QueryParams::new();
        params.push("height_min", "1.0".to_string());

        let found = catalog.search(&params).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Emu");
    }

    #[test]
    fn test_mock_catalog_identify_registers_entry() {
        let catalog = MockCatalog::with_entries(vec![creature(1, "Koala")]);

        let identified = catalog.identify(vec![1, 2, 3], "x.png").unwrap();
        assert_eq!(identified.id, 2);

        let listed = catalog.list().unwrap();
        assert!(listed.iter().any(|c| c.id == identified.id));
    }

    #[test]
    fn test_mock_catalog_scripted_failure_is_one_shot() {
        let catalog = MockCatalog::with_entries(vec![]);
        catalog.fail_next("down");

        assert!(catalog.list().is_err());
        assert!(catalog.list().is_ok());
    }

    #[test]
    fn test_mock_camera_counts_streams() {
        let camera = MockCamera::new();
        assert_eq!(camera.live_streams(), 0);

        let stream = camera.open().unwrap();
        assert_eq!(camera.live_streams(), 1);

        drop(stream);
        assert_eq!(camera.live_streams(), 0);
    }
}
