//! `geodome`: build a geodesic dome from the command line and write its
//! report, cutting list, wireframe, snapshot or mesh.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use dome_export::{bom_csv, load_snapshot, save_snapshot, suggested_file_name, ProjectMetadata};
use dome_kernel::{DomeConfig, DomeModel, Polyhedron};
use dome_mesh::{cover_mesh, mesh_to_obj};
use dome_render::{dome_to_svg, format_report, DomeView};

#[derive(Parser)]
#[command(name = "geodome")]
#[command(about = "Geodesic dome calculator: strut types, cutting list and wireframe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics and the strut table
    Report {
        #[command(flatten)]
        dome: DomeArgs,
    },

    /// Write the cutting list as CSV
    Csv {
        #[command(flatten)]
        dome: DomeArgs,
        /// Output file or directory (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an SVG wireframe with struts colored by type
    Svg {
        #[command(flatten)]
        dome: DomeArgs,
        #[arg(short, long, default_value = "dome.svg")]
        output: PathBuf,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },

    /// Write a JSON project snapshot
    Snapshot {
        #[command(flatten)]
        dome: DomeArgs,
        /// Project name stored in the snapshot. Defaults to the loaded
        /// project's name, or "Dome".
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the cover panels as a Wavefront OBJ mesh
    Obj {
        #[command(flatten)]
        dome: DomeArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Dome parameters. Flags override values read from `--config`.
#[derive(Args)]
struct DomeArgs {
    /// TOML parameter file, or a JSON snapshot written by `geodome snapshot`
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Base solid: icosahedron or octahedron
    #[arg(short, long)]
    polyhedron: Option<Polyhedron>,
    /// Subdivision frequency (V)
    #[arg(short, long)]
    frequency: Option<u32>,
    /// Fraction of the sphere kept, 0.5 for a hemisphere
    #[arg(long)]
    cut: Option<f64>,
    /// Sphere radius in meters
    #[arg(short, long)]
    radius: Option<f64>,
    /// Beam width in millimeters
    #[arg(long)]
    beam_width: Option<f64>,
    /// Beam thickness in millimeters
    #[arg(long)]
    beam_thickness: Option<f64>,
}

impl DomeArgs {
    /// The configuration, plus the project it came from when `--config`
    /// names a snapshot.
    fn resolve(&self) -> Result<(DomeConfig, Option<ProjectMetadata>)> {
        let (mut config, project) = match &self.config {
            Some(path) => read_config(path)?,
            None => (DomeConfig::default(), None),
        };
        if let Some(p) = self.polyhedron {
            config.polyhedron = p;
        }
        if let Some(v) = self.frequency {
            config.frequency = v;
        }
        if let Some(c) = self.cut {
            config.cut_fraction = c;
        }
        if let Some(r) = self.radius {
            config.radius = r;
        }
        if let Some(w) = self.beam_width {
            config.beam.width = w;
        }
        if let Some(t) = self.beam_thickness {
            config.beam.thickness = t;
        }
        Ok((config, project))
    }

    fn build_with_project(&self) -> Result<(DomeModel, Option<ProjectMetadata>)> {
        let (config, project) = self.resolve()?;
        let mut view = DomeView::new();
        let model = view.update(config).context("invalid dome parameters")?;
        Ok((model.clone(), project))
    }

    fn build(&self) -> Result<DomeModel> {
        Ok(self.build_with_project()?.0)
    }
}

fn read_config(path: &Path) -> Result<(DomeConfig, Option<ProjectMetadata>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_snapshot = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_snapshot {
        let (config, metadata) = load_snapshot(&text)
            .with_context(|| format!("failed to load snapshot {}", path.display()))?;
        eprintln!("Loaded project '{}'", metadata.name);
        Ok((config, Some(metadata)))
    } else {
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok((config, None))
    }
}

/// Write `content` to `output`, or to stdout when there is none.
fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { dome } => {
            let model = dome.build()?;
            print!("{}", format_report(&model));
        }
        Commands::Csv { dome, output } => {
            let model = dome.build()?;
            let output = output.map(|path| {
                if path.is_dir() {
                    path.join(suggested_file_name(model.config.frequency))
                } else {
                    path
                }
            });
            emit(output.as_deref(), &bom_csv(&model))?;
        }
        Commands::Svg {
            dome,
            output,
            width,
            height,
        } => {
            let model = dome.build()?;
            let c = &model.config;
            let title = format!(
                "{} {}V, cut {:.2}, r = {:.2} m",
                c.polyhedron, c.frequency, c.cut_fraction, c.radius
            );
            emit(Some(&output), &dome_to_svg(&model, width, height, &title))?;
        }
        Commands::Snapshot { dome, name, output } => {
            let (model, loaded) = dome.build_with_project()?;
            let project = match (loaded, name) {
                (Some(mut project), Some(name)) => {
                    project.name = name;
                    project
                }
                (Some(project), None) => project,
                (None, name) => ProjectMetadata::new(name.unwrap_or_else(|| "Dome".to_string())),
            };
            let json = save_snapshot(&model, &project)?;
            emit(output.as_deref(), &json)?;
        }
        Commands::Obj { dome, output } => {
            let model = dome.build()?;
            let mesh = cover_mesh(&model);
            emit(output.as_deref(), &mesh_to_obj(&mesh, "dome"))?;
        }
    }

    Ok(())
}
