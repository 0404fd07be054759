//! Card face images read from the assets directory, with drawn fallbacks
//! for any file that is missing or cannot be decoded.

use std::{collections::HashMap, fs, path::Path};

use shared::domain::{CardKind, BACK_FACE_ASSET};

pub const CARD_WIDTH: u32 = 100;
pub const CARD_HEIGHT: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Decodes any supported image and scales it to the card size.
pub fn decode_face(bytes: &[u8]) -> Result<FaceImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = decoded
        .resize_exact(
            CARD_WIDTH,
            CARD_HEIGHT,
            image::imageops::FilterType::Triangle,
        )
        .to_rgba8();
    Ok(FaceImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}

fn read_face(dir: &Path, file_name: &str) -> Result<FaceImage, String> {
    let path = dir.join(file_name);
    let bytes = fs::read(&path).map_err(|err| format!("{}: {err}", path.display()))?;
    decode_face(&bytes).map_err(|err| format!("{}: {err}", path.display()))
}

pub struct FaceTextures {
    fronts: HashMap<CardKind, egui::TextureHandle>,
    back: Option<egui::TextureHandle>,
}

impl FaceTextures {
    pub fn empty() -> Self {
        Self {
            fronts: HashMap::new(),
            back: None,
        }
    }

    /// Uploads every face that can be read. Returns the textures together
    /// with one problem description per file that could not be used.
    pub fn load(ctx: &egui::Context, dir: &Path, kinds: &[CardKind]) -> (Self, Vec<String>) {
        let mut faces = Self::empty();
        let mut problems = Vec::new();

        match read_face(dir, BACK_FACE_ASSET) {
            Ok(image) => faces.back = Some(upload(ctx, "card-face:back", &image)),
            Err(err) => problems.push(err),
        }
        for &kind in kinds {
            match read_face(dir, kind.face_asset()) {
                Ok(image) => {
                    let texture = upload(ctx, &format!("card-face:{}", kind.name()), &image);
                    faces.fronts.insert(kind, texture);
                }
                Err(err) => problems.push(err),
            }
        }

        tracing::info!(
            dir = %dir.display(),
            loaded = faces.fronts.len() + usize::from(faces.back.is_some()),
            missing = problems.len(),
            "card faces loaded"
        );
        (faces, problems)
    }

    pub fn front(&self, kind: CardKind) -> Option<&egui::TextureHandle> {
        self.fronts.get(&kind)
    }

    pub fn back(&self) -> Option<&egui::TextureHandle> {
        self.back.as_ref()
    }
}

fn upload(ctx: &egui::Context, name: &str, image: &FaceImage) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

pub const BACK_FILL: egui::Color32 = egui::Color32::from_rgb(46, 52, 64);

/// Fill for a face-up card drawn without its image.
pub fn kind_color(kind: CardKind) -> egui::Color32 {
    match kind {
        CardKind::Darkness => egui::Color32::from_rgb(58, 44, 82),
        CardKind::Double => egui::Color32::from_rgb(150, 120, 60),
        CardKind::Fairy => egui::Color32::from_rgb(196, 92, 150),
        CardKind::Fighting => egui::Color32::from_rgb(170, 84, 48),
        CardKind::Fire => egui::Color32::from_rgb(206, 64, 40),
        CardKind::Grass => egui::Color32::from_rgb(64, 150, 70),
        CardKind::Lightning => egui::Color32::from_rgb(214, 180, 40),
        CardKind::Metal => egui::Color32::from_rgb(120, 126, 136),
        CardKind::Psychic => egui::Color32::from_rgb(140, 70, 170),
        CardKind::Water => egui::Color32::from_rgb(48, 110, 200),
    }
}
