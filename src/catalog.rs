use std::fs;
use std::path::Path;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use crate::texture_loader::load_sorted_image_paths;

/// One picture of the carousel. Records never change once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarouselImage {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CarouselImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self { src: src.into(), alt: alt.into(), title: None, description: None }
    }

    pub fn with_caption(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.description = Some(description.into());
        self
    }

    pub fn is_remote(&self) -> bool {
        self.src.starts_with("http://") || self.src.starts_with("https://")
    }
}

// --- Built-in Landing Page Pictures ---
pub fn default_images() -> Vec<CarouselImage> {
    vec![
        CarouselImage::new(
            "https://images.unsplash.com/photo-1531482615713-2afd69097998?w=1200&h=600&fit=crop",
            "Business Meeting",
        )
        .with_caption("CEO Sharing Session", "Belajar langsung dari para pemimpin industri Indonesia"),
        CarouselImage::new(
            "https://images.unsplash.com/photo-1523240795612-9a054b0db644?w=1200&h=600&fit=crop",
            "Students Collaboration",
        )
        .with_caption(
            "Collaborative Learning",
            "Membangun jaringan dengan mahasiswa terbaik dari seluruh Indonesia",
        ),
        CarouselImage::new(
            "https://images.unsplash.com/photo-1560439514-4e9645039924?w=1200&h=600&fit=crop",
            "Leadership Workshop",
        )
        .with_caption("Leadership Workshop", "Mengasah kemampuan kepemimpinan melalui workshop intensif"),
        CarouselImage::new(
            "https://images.unsplash.com/photo-1517245386807-bb43f82c33c4?w=1200&h=600&fit=crop",
            "Networking Event",
        )
        .with_caption("Networking Event", "Kesempatan networking dengan 100+ corporate partners"),
        CarouselImage::new(
            "https://images.unsplash.com/photo-1475721027785-f74eccf877e2?w=1200&h=600&fit=crop",
            "Public Speaking",
        )
        .with_caption("Public Speaking Training", "Melatih kemampuan presentasi dan public speaking"),
    ]
}

// --- JSON Manifest: an array of image records ---
pub fn parse_manifest(json: &str) -> Result<Vec<CarouselImage>> {
    let images: Vec<CarouselImage> = serde_json::from_str(json).context("Invalid image manifest")?;
    if images.is_empty() {
        bail!("Image manifest lists no images");
    }
    Ok(images)
}

pub fn load_manifest(path: &Path) -> Result<Vec<CarouselImage>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let images = parse_manifest(&json).with_context(|| format!("In manifest {}", path.display()))?;
    log::info!("Loaded {} images from manifest {}", images.len(), path.display());
    Ok(images)
}

// --- Local Directory: one untitled record per picture, sorted by file name ---
pub fn from_directory(dir_path: &Path) -> Result<Vec<CarouselImage>> {
    let images: Vec<CarouselImage> = load_sorted_image_paths(dir_path)?
        .into_iter()
        .map(|path| {
            let alt = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            CarouselImage::new(path.to_string_lossy(), alt)
        })
        .collect();
    log::info!("Found {} images in {}", images.len(), dir_path.display());
    Ok(images)
}
