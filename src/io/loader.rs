// src/io/loader.rs
//
// Startup loader: the dataset and the boundary file load on two worker
// threads so neither blocks the UI or the other. Results come back over an
// mpsc channel that the main loop polls on a glib timeout; plain data
// crosses the thread boundary, widgets never do.

use crate::model::{Dataset, WorldMap};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub enum LoadMessage {
    Dataset(Result<Dataset, String>),
    Boundaries(Result<WorldMap, String>),
}

pub struct LoadRequest {
    pub dataset_path: PathBuf,
    pub boundaries_file: Option<PathBuf>,
    pub boundaries_url: String,
    pub cache_path: PathBuf,
}

/// Kick off both loads. The receiver yields exactly two messages, one per
/// resource, in completion order.
pub fn spawn(request: LoadRequest) -> Receiver<LoadMessage> {
    let (tx, rx) = mpsc::channel();

    let dataset_tx = tx.clone();
    let dataset_path = request.dataset_path;
    thread::spawn(move || {
        let result = super::dataset::load(&dataset_path)
            .map_err(|e| format!("dataset {:?}: {}", dataset_path, e));
        let _ = dataset_tx.send(LoadMessage::Dataset(result));
    });

    thread::spawn(move || {
        let result = super::boundaries::load(
            request.boundaries_file.as_deref(),
            &request.boundaries_url,
            &request.cache_path,
        )
        .map_err(|e| format!("boundaries: {}", e));
        let _ = tx.send(LoadMessage::Boundaries(result));
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_both_halves_arrive() {
        let dir = std::env::temp_dir();
        let dataset_path = dir.join("capview_loader_dataset.json");
        File::create(&dataset_path)
            .unwrap()
            .write_all(br#"{"years": ["2020"]}"#)
            .unwrap();
        let boundaries_path = dir.join("capview_loader_boundaries.json");
        File::create(&boundaries_path)
            .unwrap()
            .write_all(
                br#"{"type": "FeatureCollection", "features": [{
                    "type": "Feature",
                    "properties": {"ADMIN": "Atlantis"},
                    "geometry": {"type": "Polygon",
                                 "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
                }]}"#,
            )
            .unwrap();

        let rx = spawn(LoadRequest {
            dataset_path,
            boundaries_file: Some(boundaries_path),
            boundaries_url: String::new(),
            cache_path: dir.join("capview_loader_cache.json"),
        });

        let mut got_dataset = false;
        let mut got_boundaries = false;
        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                LoadMessage::Dataset(r) => {
                    assert!(r.is_ok());
                    got_dataset = true;
                }
                LoadMessage::Boundaries(r) => {
                    assert!(r.is_ok());
                    got_boundaries = true;
                }
            }
        }
        assert!(got_dataset && got_boundaries);
    }

    #[test]
    fn test_dataset_failure_reported() {
        let dir = std::env::temp_dir();
        let boundaries_path = dir.join("capview_loader_boundaries2.json");
        File::create(&boundaries_path)
            .unwrap()
            .write_all(
                br#"{"type": "FeatureCollection", "features": [{
                    "type": "Feature",
                    "properties": {"ADMIN": "Atlantis"},
                    "geometry": {"type": "Polygon",
                                 "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
                }]}"#,
            )
            .unwrap();

        let rx = spawn(LoadRequest {
            dataset_path: PathBuf::from("/no/such/dataset.json"),
            boundaries_file: Some(boundaries_path),
            boundaries_url: String::new(),
            cache_path: dir.join("capview_loader_cache2.json"),
        });

        let mut saw_failure = false;
        for _ in 0..2 {
            if let LoadMessage::Dataset(r) = rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                assert!(r.is_err());
                saw_failure = true;
            }
        }
        assert!(saw_failure);
    }
}
