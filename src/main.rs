//! Structure inspector for native builds.
//!
//! Usage: `keypose <structure.json> [width height]`
//!
//! Validates a stored keypoint structure, lays it out on a canvas of the
//! given size (800x600 by default) and logs a summary.

#[cfg(not(target_arch = "wasm32"))]
mod inspect {
    use keypose::color::to_hex;
    use keypose::config::EditorConfig;
    use keypose::error::StructureError;
    use keypose::geometry::RegionOfInterest;
    use keypose::model::{KeypointStructure, Label};
    use keypose::render;
    use keypose::session::AnnotationSession;
    use keypose::template::TemplateEditor;

    const DEFAULT_CANVAS: (f32, f32) = (800.0, 600.0);

    #[derive(Debug, thiserror::Error)]
    pub enum InspectError {
        #[error("Usage: keypose <structure.json> [width height]")]
        Usage,

        #[error("Invalid canvas size: {0}")]
        CanvasSize(String),

        #[error("Failed to read {path}: {source}")]
        Io {
            path: String,
            source: std::io::Error,
        },

        #[error(transparent)]
        Structure(#[from] StructureError),
    }

    struct Args {
        path: String,
        canvas: RegionOfInterest,
    }

    fn parse_dimension(value: &str) -> Result<f32, InspectError> {
        value
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0)
            .ok_or_else(|| InspectError::CanvasSize(value.to_string()))
    }

    fn parse_args(args: &[String]) -> Result<Args, InspectError> {
        let (path, (width, height)) = match args {
            [path] => (path.clone(), DEFAULT_CANVAS),
            [path, width, height] => (
                path.clone(),
                (parse_dimension(width)?, parse_dimension(height)?),
            ),
            _ => return Err(InspectError::Usage),
        };
        Ok(Args {
            path,
            canvas: RegionOfInterest::from_size(width, height),
        })
    }

    /// Labels for a structure without a label schema: one per position, in
    /// stored order.
    fn labels_for(structure: &KeypointStructure) -> Vec<Label> {
        structure
            .positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                Label::with_default_color(position.label.clone(), position.label.clone(), index)
            })
            .collect()
    }

    /// Log at the configured level; `RUST_LOG` overrides it.
    pub fn init_logging(config: &EditorConfig) {
        let level = config.preferences.log_level;
        env_logger::Builder::new()
            .filter_level(level.to_level_filter())
            .parse_default_env()
            .format_timestamp(None)
            .format_target(false)
            .init();
        log::debug!("Log level: {}", level.name());
    }

    pub fn run(config: &EditorConfig, args: &[String]) -> Result<(), InspectError> {
        let args = parse_args(args)?;
        let json = std::fs::read_to_string(&args.path).map_err(|source| InspectError::Io {
            path: args.path.clone(),
            source,
        })?;

        let structure = KeypointStructure::from_json(&json)?;
        let labels = labels_for(&structure);
        let editor =
            TemplateEditor::from_structure(&structure, &labels, args.canvas, config.undo_config())?;
        let state = editor.state();

        log::info!(
            "{}: {} keypoints, {} edges on a {}x{} canvas",
            args.path,
            state.points.len(),
            state.edges.len(),
            args.canvas.width,
            args.canvas.height
        );
        for edge in &state.edges {
            log::debug!("  {} -> {}", edge.from, edge.to);
        }

        // Lay the structure out the way the readonly preview draws it
        let preferences = &config.preferences;
        let normalized = structure.build_template(&labels, &RegionOfInterest::from_size(1.0, 1.0))?;
        let preview = TemplateEditor::readonly_preview_with(&normalized, args.canvas, preferences);
        let session = AnnotationSession::new();
        for visual in render::node_visuals(&preview.state().points, &session, preferences.keypoint_radius) {
            log::debug!(
                "  {} at ({:.1}, {:.1}) r={:.1} text={}",
                visual.label_id,
                visual.center.x,
                visual.center.y,
                visual.radius,
                to_hex(visual.text_color)
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use keypose::config::EditorConfig;

    let config = EditorConfig::load_from_default_path().unwrap_or_default();
    inspect::init_logging(&config);
    log::debug!("keypose v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = inspect::run(&config, &args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// WASM builds use the library only
#[cfg(target_arch = "wasm32")]
fn main() {}
