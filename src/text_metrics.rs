use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static MEASURER: Lazy<Mutex<FontMeasurer>> = Lazy::new(|| Mutex::new(FontMeasurer::new()));

/// Advance assumed for glyphs the face cannot resolve, as a fraction of
/// the font size.
const MISSING_GLYPH_RATIO: f32 = 0.56;

/// Measures the pixel width of `text` against the first system font that
/// satisfies `font_family` (a CSS-style family stack). Returns `None`
/// when no matching face can be loaded.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct FontMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key).and_then(|face| face.as_mut())?;
        let normalized = text.replace('\t', "    ");
        Some(face.measure(&normalized, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        let tokens = parse_family_stack(font_family);
        let families: Vec<Family<'_>> = tokens
            .iter()
            .map(|token| match token {
                FamilyToken::Generic(family) => *family,
                FamilyToken::Name(name) => Family::Name(name.as_str()),
            })
            .collect();

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            loaded = LoadedFace::parse(data.to_vec(), index);
        });
        loaded
    }
}

/// A font face reduced to what width estimation needs: the raw bytes plus
/// a precomputed ASCII advance table. Non-ASCII advances are resolved by
/// re-parsing the face on demand and cached per character.
struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
    extra_advances: HashMap<char, u16>,
}

impl LoadedFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        drop(face);
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
            extra_advances: HashMap::new(),
        })
    }

    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * MISSING_GLYPH_RATIO;

        if text.is_ascii() {
            let mut width = 0.0f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[*byte as usize];
                width += if advance == 0 {
                    fallback
                } else {
                    advance as f32 * scale
                };
            }
            return width.max(0.0);
        }

        self.cache_missing_advances(text);
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                self.ascii_advances[ch as usize]
            } else {
                self.extra_advances.get(&ch).copied().unwrap_or(0)
            };
            width += if advance == 0 {
                fallback
            } else {
                advance as f32 * scale
            };
        }
        width.max(0.0)
    }

    fn cache_missing_advances(&mut self, text: &str) {
        let missing: Vec<char> = text
            .chars()
            .filter(|ch| !ch.is_ascii() && !self.extra_advances.contains_key(ch))
            .collect();
        if missing.is_empty() {
            return;
        }
        let Ok(face) = Face::parse(&self.data, self.index) else {
            return;
        };
        for ch in missing {
            let advance = face
                .glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .unwrap_or(0);
            self.extra_advances.insert(ch, advance);
        }
    }
}

enum FamilyToken {
    Generic(Family<'static>),
    Name(String),
}

fn parse_family_stack(font_family: &str) -> Vec<FamilyToken> {
    let mut tokens = Vec::new();
    for part in font_family.split(',') {
        let raw = part.trim().trim_matches('"').trim_matches('\'');
        if raw.is_empty() {
            continue;
        }
        match raw.to_ascii_lowercase().as_str() {
            "serif" => tokens.push(FamilyToken::Generic(Family::Serif)),
            "sans-serif" => tokens.push(FamilyToken::Generic(Family::SansSerif)),
            "monospace" | "ui-monospace" => tokens.push(FamilyToken::Generic(Family::Monospace)),
            "cursive" => tokens.push(FamilyToken::Generic(Family::Cursive)),
            "fantasy" => tokens.push(FamilyToken::Generic(Family::Fantasy)),
            "system-ui" | "-apple-system" | "ui-sans-serif" => {
                tokens.push(FamilyToken::Generic(Family::SansSerif))
            }
            _ => tokens.push(FamilyToken::Name(raw.to_string())),
        }
    }
    if tokens.is_empty() {
        tokens.push(FamilyToken::Generic(Family::SansSerif));
    }
    tokens
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
