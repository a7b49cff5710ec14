//! Read, decompose, aggregate and write in one call.

use crate::engine::{ComputeOutcome, DecompositionEngine, ParryEngine};
use crate::{
    aggregate, io, ConsoleProgress, DecompositionGateway, DecompositionParameters, Error,
    ExportMode, FileLogSink, HullExporter, LogSink, MeshFormat, Observers, PipelineResult, Status,
};
use std::path::{Path, PathBuf};

/// Everything a pipeline run needs.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// The mesh to decompose, an `.off` or `.obj` file.
    pub input: PathBuf,
    /// Where to write the hulls (`.obj`, `.wrl` or `.off`). Nothing is
    /// written if `None`.
    pub output: Option<PathBuf>,
    /// A file receiving the decomposition log.
    pub log: Option<PathBuf>,
    /// The decomposition parameters, normalized before use.
    pub params: DecompositionParameters,
    /// Print progress and log messages on the standard output.
    pub verbose: bool,
    /// Whether hulls go to one file or one file each.
    pub export_mode: ExportMode,
    /// Seed of the VRML hull colors. Random if `None`.
    pub color_seed: Option<u64>,
}

impl PipelineOptions {
    /// Options decomposing `input` with the default parameters, writing nothing.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            log: None,
            params: DecompositionParameters::default(),
            verbose: false,
            export_mode: ExportMode::default(),
            color_seed: None,
        }
    }

    /// Sets the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the log file path.
    pub fn with_log(mut self, log: impl Into<PathBuf>) -> Self {
        self.log = Some(log.into());
        self
    }

    /// Sets the decomposition parameters.
    pub fn with_params(mut self, params: DecompositionParameters) -> Self {
        self.params = params;
        self
    }

    /// Enables or disables console output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets how hulls are distributed over output files.
    pub fn with_export_mode(mut self, export_mode: ExportMode) -> Self {
        self.export_mode = export_mode;
        self
    }

    /// Makes the VRML hull colors reproducible.
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }
}

/// The pipeline's log: an optional file, optionally echoed on the console.
struct PipelineLog {
    file: Option<FileLogSink>,
    echo: bool,
}

impl PipelineLog {
    fn open(path: Option<&Path>, echo: bool) -> Self {
        let file = path.and_then(|path| match FileLogSink::create(path) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("cannot create log file {}: {}", path.display(), e);
                None
            }
        });
        Self { file, echo }
    }
}

impl LogSink for PipelineLog {
    fn write(&mut self, text: &str) {
        if let Some(file) = &mut self.file {
            file.write(text);
        }
        if self.echo {
            print!("{}", text);
        }
    }
}

/// Runs the pipeline with parry's V-HACD.
pub fn run(options: &PipelineOptions) -> PipelineResult {
    run_with_engine(options, ParryEngine::new())
}

/// Runs the pipeline with the given engine.
///
/// Read errors and engine failures return an empty result with the matching
/// status; a cancelled decomposition returns an empty result with
/// [`Status::Cancelled`]. If the decomposition succeeds but the combined
/// output cannot be written, the hulls are still returned, with
/// [`Status::WriteFailure`].
pub fn run_with_engine<E: DecompositionEngine>(options: &PipelineOptions, engine: E) -> PipelineResult {
    let mut log_sink = PipelineLog::open(options.log.as_deref(), options.verbose);
    let mut console = ConsoleProgress;
    let mut observers = Observers::none().with_log(&mut log_sink);
    if options.verbose {
        observers = observers.with_progress(&mut console);
    }

    match execute(options, engine, &mut observers) {
        Ok(result) => result,
        Err(e) => {
            log::error!("{}", e);
            observers.log(&format!("{}\n", e));
            PipelineResult::empty(e.status())
        }
    }
}

fn execute<E: DecompositionEngine>(
    options: &PipelineOptions,
    engine: E,
    observers: &mut Observers<'_>,
) -> Result<PipelineResult, Error> {
    // Released on every return path, including the early ones.
    let mut gateway = DecompositionGateway::new(engine);
    observers.log(&files_block(options));

    observers.log("+ Load mesh\n");
    let mesh = io::read_mesh(&options.input)?;

    // Checked before decomposing so an unwritable target wastes no engine time.
    if let Some(output) = &options.output {
        let _ = MeshFormat::from_output_path(output)?;
    }

    let hulls = match gateway.compute(&mesh, &options.params, observers)? {
        ComputeOutcome::Completed => gateway.hulls()?,
        ComputeOutcome::Cancelled => return Ok(PipelineResult::empty(Status::Cancelled)),
    };
    gateway.release();
    drop(mesh);
    for (k, hull) in hulls.iter().enumerate() {
        let line = format!(
            "fetching result convex hull #{}, #V: {}, #F: {}",
            k,
            hull.vertex_count(),
            hull.triangle_count()
        );
        log::debug!("{}", line);
        observers.log(&format!("\t {}\n", line));
    }

    let mut result = aggregate(&hulls);

    if let Some(output) = &options.output {
        let mut exporter = match options.color_seed {
            Some(seed) => HullExporter::with_seed(options.export_mode, seed),
            None => HullExporter::new(options.export_mode),
        };

        match exporter.export(&hulls, output, observers) {
            Ok(report) if !report.failed.is_empty() => log::warn!(
                "{} of {} hull files could not be written",
                report.failed.len(),
                hulls.len()
            ),
            Ok(_) => {}
            Err(e) => {
                log::error!("{}", e);
                observers.log(&format!("{}\n", e));
                result.status = e.status();
            }
        }
    }

    Ok(result)
}

fn files_block(options: &PipelineOptions) -> String {
    let mut block = format!("+ Files\n\t input  {}\n", options.input.display());
    match &options.output {
        Some(output) => block += &format!("\t output {}\n", output.display()),
        None => block += "\t NO WRITTEN OUTPUT.\n",
    }
    match &options.log {
        Some(path) => block += &format!("\t log    {}\n", path.display()),
        None => block += "\t NO WRITTEN LOG.\n",
    }
    block
}
