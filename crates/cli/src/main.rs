use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use faceveil_core::anonymize::domain::method::AnonymizationMethod;
use faceveil_core::anonymize::infrastructure::anonymizer_factory::create_anonymizer;
use faceveil_core::detection::domain::face_detector::FaceDetector;
use faceveil_core::detection::infrastructure::fallback_detector::FallbackDetector;
use faceveil_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use faceveil_core::detection::infrastructure::seeta_cascade_detector::SeetaCascadeDetector;
use faceveil_core::pipeline::anonymize_batch_use_case::{AnonymizeBatchUseCase, BatchItemResult};
use faceveil_core::pipeline::anonymize_image_use_case::AnonymizeImageUseCase;
use faceveil_core::pipeline::anonymize_video_use_case::AnonymizeVideoUseCase;
use faceveil_core::pipeline::frame_processor::FrameProcessor;
use faceveil_core::shared::constants::{
    CASCADE_MODEL_NAME, CASCADE_MODEL_URL, DEFAULT_INTENSITY, FACE_MODEL_NAME, FACE_MODEL_URL,
    IMAGE_EXTENSIONS, MAX_BATCH_SIZE,
};
use faceveil_core::shared::model_resolver;
use faceveil_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use faceveil_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Face detection and anonymization for videos and images.
#[derive(Parser)]
#[command(name = "faceveil")]
struct Cli {
    /// Input image or video files. Multiple inputs run as an image batch.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file, or output directory in batch mode.
    #[arg(short, long)]
    output: PathBuf,

    /// Anonymization method: blur, pixelate, or mask.
    #[arg(long, default_value = "blur")]
    method: String,

    /// Method strength (blur kernel size / pixelate block factor).
    #[arg(long, default_value_t = DEFAULT_INTENSITY)]
    intensity: u32,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let method = parse_method(&cli.method);
    let detector = build_detector(cli.confidence)?;
    let processor = FrameProcessor::new(detector, create_anonymizer(method, cli.intensity));

    if cli.inputs.len() > 1 {
        run_batch(&cli.inputs, &cli.output, processor)
    } else if is_image(&cli.inputs[0]) {
        run_image(&cli.inputs[0], &cli.output, processor)
    } else {
        run_video(&cli.inputs[0], &cli.output, processor)
    }
}

fn run_image(
    input: &Path,
    output: &Path,
    processor: FrameProcessor,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let mut use_case = AnonymizeImageUseCase::new(processor);
    let outcome = use_case.execute(&bytes)?;
    std::fs::write(output, &outcome.jpeg)?;
    log::info!(
        "Anonymized {} face(s), output written to {}",
        outcome.face_count,
        output.display()
    );
    Ok(())
}

fn run_video(
    input: &Path,
    output: &Path,
    processor: FrameProcessor,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress: Box<dyn FnMut(usize, usize) + Send> = Box::new(|current, total| {
        if total > 0 {
            eprint!("\rProcessing frame {current}/{total}");
        } else {
            eprint!("\rProcessing frame {current}");
        }
    });

    let mut use_case = AnonymizeVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        processor,
        Some(progress),
    );
    let result = use_case.execute(input, output)?;
    eprintln!();
    log::info!(
        "Anonymized {} face(s) across {} frames, output written to {}",
        result.total_faces,
        result.frames_processed,
        output.display()
    );
    Ok(())
}

fn run_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    processor: FrameProcessor,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;

    let mut items = Vec::with_capacity(inputs.len());
    for input in inputs {
        items.push(std::fs::read(input)?);
    }

    let mut use_case = AnonymizeBatchUseCase::new(AnonymizeImageUseCase::new(processor));
    let results = use_case.execute(&items);

    let mut failures = 0usize;
    for (input, result) in inputs.iter().zip(&results) {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        match result {
            BatchItemResult::Success { face_count, jpeg } => {
                let dest = output_dir.join(format!("{stem}_anonymized.jpg"));
                std::fs::write(&dest, jpeg)?;
                log::info!(
                    "{}: {} face(s), written to {}",
                    input.display(),
                    face_count,
                    dest.display()
                );
            }
            BatchItemResult::Error { message } => {
                failures += 1;
                eprintln!("{}: {message}", input.display());
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {} inputs failed", inputs.len()).into());
    }
    Ok(())
}

fn build_detector(confidence: f64) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    // The cascade fallback is mandatory; the ONNX primary is best-effort
    // and downgraded to the fallback when it cannot be loaded.
    log::info!("Resolving model: {CASCADE_MODEL_NAME}");
    let cascade_path = model_resolver::resolve(
        CASCADE_MODEL_NAME,
        CASCADE_MODEL_URL,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();
    let fallback: Box<dyn FaceDetector> = Box::new(SeetaCascadeDetector::new(&cascade_path)?);

    log::info!("Resolving model: {FACE_MODEL_NAME}");
    let primary: Option<Box<dyn FaceDetector>> =
        match model_resolver::resolve(FACE_MODEL_NAME, FACE_MODEL_URL, Some(Box::new(download_progress)))
            .map_err(|e| -> Box<dyn std::error::Error> { e.into() })
            .and_then(|path| {
                Ok(Box::new(OnnxFaceDetector::new(&path, confidence)?) as Box<dyn FaceDetector>)
            }) {
            Ok(detector) => Some(detector),
            Err(e) => {
                log::warn!("Face model unavailable ({e}), using cascade detector only");
                None
            }
        };
    eprintln!();

    Ok(Box::new(FallbackDetector::new(primary, fallback)))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    if cli.inputs.len() > 1 {
        if cli.inputs.len() > MAX_BATCH_SIZE {
            return Err(format!(
                "Batch mode accepts at most {MAX_BATCH_SIZE} inputs, got {}",
                cli.inputs.len()
            )
            .into());
        }
        if let Some(not_image) = cli.inputs.iter().find(|p| !is_image(p)) {
            return Err(format!(
                "Batch mode only accepts images, got {}",
                not_image.display()
            )
            .into());
        }
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    Ok(())
}

fn parse_method(name: &str) -> Option<AnonymizationMethod> {
    let method = AnonymizationMethod::parse(name);
    if method.is_none() {
        log::warn!("Unknown method '{name}', output will be left unmodified");
    }
    method
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
