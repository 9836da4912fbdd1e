use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use walkdir::WalkDir;

use superpoint::{
    AnnotationSession, AnnotationStore, DownsampleStrategy, GraphStrategy, PartitionAlgorithm,
    PipelineConfig, Point3, PointSet, TreeHeight,
};

#[derive(Parser)]
#[command(name = "superpoint", version)]
#[command(about = "Segment point clouds into labeled superpoints")]
struct Cli {
    /// A point cloud file (.txt/.xyz, one "x y z ..." row per point) or a
    /// folder of them
    input: PathBuf,

    /// Folder receiving the annotation records
    #[arg(short, long, default_value = "annotations")]
    dest: PathBuf,

    /// Downsampling strategy
    #[arg(long, value_enum, default_value = "bucket-fps-medium")]
    downsampling: DownsampleArg,

    /// Desired point count after downsampling
    #[arg(long, default_value_t = 2048)]
    target_count: usize,

    /// Superpoint graph construction
    #[arg(long, value_enum, default_value = "mst")]
    graph: GraphArg,

    /// Neighbor count for the knn graph
    #[arg(long, default_value_t = 8)]
    k: usize,

    /// Community detection algorithm
    #[arg(long, value_enum, default_value = "label-propagation")]
    community: PartitionArg,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DownsampleArg {
    Random,
    FpsVanilla,
    FpsWindowed,
    FpsWindowedTree,
    BucketFpsSmall,
    BucketFpsMedium,
    BucketFpsLarge,
}

impl From<DownsampleArg> for DownsampleStrategy {
    fn from(arg: DownsampleArg) -> Self {
        match arg {
            DownsampleArg::Random => DownsampleStrategy::Random,
            DownsampleArg::FpsVanilla => DownsampleStrategy::FpsVanilla,
            DownsampleArg::FpsWindowed => DownsampleStrategy::FpsWindowed,
            DownsampleArg::FpsWindowedTree => DownsampleStrategy::FpsWindowedTree,
            DownsampleArg::BucketFpsSmall => DownsampleStrategy::BucketFps(TreeHeight::Small),
            DownsampleArg::BucketFpsMedium => DownsampleStrategy::BucketFps(TreeHeight::Medium),
            DownsampleArg::BucketFpsLarge => DownsampleStrategy::BucketFps(TreeHeight::Large),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphArg {
    Knn,
    Mst,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PartitionArg {
    LabelPropagation,
    AsyncLabelPropagation,
    Louvain,
    ModularityGreedy,
    Bipartition,
}

impl From<PartitionArg> for PartitionAlgorithm {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::LabelPropagation => PartitionAlgorithm::LabelPropagation,
            PartitionArg::AsyncLabelPropagation => PartitionAlgorithm::AsyncLabelPropagation,
            PartitionArg::Louvain => PartitionAlgorithm::Louvain,
            PartitionArg::ModularityGreedy => PartitionAlgorithm::ModularityGreedy,
            PartitionArg::Bipartition => PartitionAlgorithm::Bipartition,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig {
        downsample: cli.downsampling.into(),
        target_count: cli.target_count,
        graph: match cli.graph {
            GraphArg::Knn => GraphStrategy::Knn { k: cli.k },
            GraphArg::Mst => GraphStrategy::Mst,
        },
        partition: cli.community.into(),
        seed: cli.seed,
    };

    let files = collect_cloud_files(&cli.input)?;
    if files.is_empty() {
        bail!("no .txt/.xyz point cloud files under {}", cli.input.display());
    }

    fs::create_dir_all(&cli.dest)
        .with_context(|| format!("Failed to create destination folder {}", cli.dest.display()))?;

    println!("=== superpoint: {} cloud(s) to segment ===\n", files.len());
    for file in files {
        process_cloud(&file, &cli.dest, config)?;
    }
    Ok(())
}

/// All point cloud files under `input` (or `input` itself).
fn collect_cloud_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("txt") | Some("xyz")
            )
        })
        .collect();
    files.sort();
    Ok(files)
}

fn process_cloud(path: &Path, dest: &Path, config: PipelineConfig) -> Result<()> {
    println!("--- {} ---", path.display());

    // Step 1: read the raw buffer
    let step_start = Instant::now();
    let source = load_xyz(path)?;
    println!(
        "Step 1: loaded {} points [{:.2}s]",
        source.len(),
        step_start.elapsed().as_secs_f64()
    );

    // Step 2: segment, or pick the persisted record back up
    let step_start = Instant::now();
    let store = AnnotationStore::for_source(dest, path)
        .with_context(|| format!("Failed to derive record path for {}", path.display()))?;
    let had_record = store.exists();
    let session = AnnotationSession::open(source, config, store)
        .with_context(|| format!("Segmentation failed for {}", path.display()))?;
    println!(
        "Step 2: {} {} clusters over {} points [{:.2}s]",
        if had_record { "restored" } else { "computed" },
        session.cluster_count(),
        session.points().len(),
        step_start.elapsed().as_secs_f64()
    );

    // Show cluster size distribution
    let mut sizes: Vec<(u32, usize)> = session
        .partition()
        .iter()
        .map(|c| (c.id, c.len()))
        .collect();
    sizes.sort_by_key(|&(_, size)| std::cmp::Reverse(size));
    println!("  Largest clusters:");
    for (id, size) in sizes.iter().take(5) {
        println!("    Cluster {}: {} points", id, size);
    }

    println!(
        "  Labeled: {} / {}   Record: {}\n",
        session.labels().labeled_count(),
        session.cluster_count(),
        session.store().path().display()
    );
    Ok(())
}

/// Minimal xyz text reader: first three whitespace-separated columns per
/// line, extra columns ignored.
fn load_xyz(path: &Path) -> Result<PointSet> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut points: Vec<Point3> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut coords = [0.0f64; 3];
        let mut fields = line.split_whitespace();
        for coord in &mut coords {
            *coord = fields
                .next()
                .with_context(|| {
                    format!("{}:{}: fewer than 3 columns", path.display(), line_no + 1)
                })?
                .parse()
                .with_context(|| format!("{}:{}: bad coordinate", path.display(), line_no + 1))?;
        }
        points.push(coords);
    }
    Ok(PointSet::new(points))
}
