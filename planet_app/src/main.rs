//! Planet demo application
//!
//! Builds the planet scene on the headless recording backend, draws a few
//! frames and prints what each frame would have sent to the GPU.
//!
//! ```text
//! planet_demo [CONFIG.toml|CONFIG.ron] [FRAMES]
//! ```
//!
//! Without a config file the default scene is used, with placeholder
//! textures generated into a temporary directory. From the second frame on,
//! each frame switches on the next draw option, the way a user would tick
//! the check boxes of a UI one at a time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("invalid frame count '{0}'")]
    FrameCount(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

const DEFAULT_FRAMES: usize = 6;

fn placeholder_textures(config: &mut SceneConfig) -> Result<(), DemoError> {
    let dir: PathBuf = std::env::temp_dir().join(format!("planet_demo_{}", std::process::id()));
    std::fs::create_dir_all(&dir).map_err(ConfigError::Io)?;

    let textures = &mut config.textures;
    for (slot, file, color) in [
        (&mut textures.day, "day.png", [40, 90, 200, 255]),
        (&mut textures.night, "night.png", [250, 220, 120, 255]),
        (&mut textures.bathymetry, "bathymetry.png", [0, 0, 0, 255]),
        (&mut textures.clouds, "clouds.png", [255, 255, 255, 160]),
    ] {
        let path = dir.join(file);
        ImageData::solid_color(4, 2, color).save(&path)?;
        *slot = path.display().to_string();
    }
    log::info!("Generated placeholder textures in {}", dir.display());
    Ok(())
}

fn summarize(frame: usize, calls: &[RenderCall]) {
    let mut per_program: BTreeMap<&str, usize> = BTreeMap::new();
    let mut draws = 0;
    for call in calls {
        if let Some(program) = call.program() {
            *per_program.entry(program).or_default() += 1;
        }
        if matches!(call, RenderCall::Draw { .. }) {
            draws += 1;
        }
    }

    println!("frame {}: {} calls, {} draws", frame, calls.len(), draws);
    for (program, count) in per_program {
        println!("  {:<8} {}", program, count);
    }
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => {
            log::info!("Loading scene configuration from {}", path);
            SceneConfig::load_from_file(&path)?
        }
        None => {
            let mut config = SceneConfig::default();
            placeholder_textures(&mut config)?;
            config
        }
    };
    let frames = match args.next() {
        Some(arg) => arg.parse::<usize>().map_err(|_| DemoError::FrameCount(arg))?,
        None => DEFAULT_FRAMES,
    };

    let option_names: Vec<String> =
        config.draw_options.iter().map(|(name, _)| name.clone()).collect();

    let backend = RecordingBackend::new();
    let log = backend.log();
    let mut scene = PlanetSceneBuilder::new(config).build(Box::new(backend))?;
    println!("construction: {} calls", log.len());

    for frame in 0..frames {
        if let Some(name) = frame.checked_sub(1).and_then(|i| option_names.get(i)) {
            scene.draw_options.set(name, true);
            log::info!("Enabled draw option '{}'", name);
        }

        let mark = log.len();
        scene.draw()?;
        summarize(frame, &log.since(mark));
    }

    Ok(())
}

fn main() {
    logging::init();

    log::info!("Starting planet demo");
    if let Err(e) = run() {
        log::error!("Planet demo failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
