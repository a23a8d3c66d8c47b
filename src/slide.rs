use raylib::prelude::*;
use crate::catalog::CarouselImage;
use crate::theme::*;

/// A carousel image ready to draw: its record plus the texture, when the
/// source could be loaded locally.
pub struct Slide {
    pub image: CarouselImage,
    texture: Option<Texture2D>,
    tint: Color,
}

impl Slide {
    pub fn new(image: CarouselImage, texture: Option<Texture2D>, index: usize) -> Self {
        Self {
            image,
            texture,
            tint: PLACEHOLDER_PALETTE[index % PLACEHOLDER_PALETTE.len()],
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Picture only, cropped to cover `dest`.
    pub fn draw_picture(&self, d: &mut impl RaylibDraw, dest: Rectangle) {
        match &self.texture {
            Some(texture) => {
                let source = cover_source(texture.width() as f32, texture.height() as f32, dest);
                d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
            }
            None => {
                // Remote sources are not fetched, show a tinted panel instead
                d.draw_rectangle_gradient_v(
                    dest.x as i32,
                    dest.y as i32,
                    dest.width as i32,
                    dest.height as i32,
                    self.tint,
                    BACKGROUND,
                );
            }
        }
    }

    /// Full slide: picture, bottom shade and caption.
    pub fn draw(&self, d: &mut impl RaylibDraw, dest: Rectangle) {
        self.draw_picture(d, dest);

        if !self.has_texture() {
            let label_size = 20;
            let label_width = text_width(&self.image.alt, label_size);
            d.draw_text(
                &self.image.alt,
                (dest.x + (dest.width - label_width as f32) * 0.5) as i32,
                (dest.y + dest.height * 0.3) as i32,
                label_size,
                with_opacity(Color::WHITE, 0.4),
            );
        }

        // Overlay
        let shade_top = dest.y + dest.height * 0.4;
        d.draw_rectangle_gradient_v(
            dest.x as i32,
            shade_top as i32,
            dest.width as i32,
            (dest.y + dest.height - shade_top) as i32,
            with_opacity(SECONDARY, 0.0),
            with_opacity(SECONDARY, 0.9),
        );

        // Content
        let padding = if dest.width < 768.0 { 24.0 } else { 40.0 };
        let (title_size, text_size) = if dest.width < 768.0 { (24, 14) } else { (32, 18) };
        let mut y = dest.y + dest.height - padding - text_size as f32;
        if let Some(description) = &self.image.description {
            d.draw_text(description, (dest.x + padding) as i32, y as i32, text_size, with_opacity(Color::WHITE, 0.8));
            y -= title_size as f32 + 8.0;
        }
        if let Some(title) = &self.image.title {
            d.draw_text(title, (dest.x + padding) as i32, y as i32, title_size, Color::WHITE);
        }

        d.draw_rectangle_lines_ex(dest, 2.0, with_opacity(PRIMARY, 0.2));
    }
}

// Source rectangle that fills `dest` without distortion (object-fit: cover)
pub fn cover_source(tex_width: f32, tex_height: f32, dest: Rectangle) -> Rectangle {
    if tex_width <= 0.0 || tex_height <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_width, tex_height);
    }
    let dest_aspect = dest.width / dest.height;
    if tex_width / tex_height > dest_aspect {
        let width = tex_height * dest_aspect;
        Rectangle::new((tex_width - width) * 0.5, 0.0, width, tex_height)
    } else {
        let height = tex_width / dest_aspect;
        Rectangle::new(0.0, (tex_height - height) * 0.5, tex_width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_texture_is_cropped_horizontally() {
        let source = cover_source(2000.0, 600.0, Rectangle::new(0.0, 0.0, 1600.0, 900.0));
        assert!((source.width - 1066.6667).abs() < 0.01);
        assert!((source.x - 466.6667).abs() < 0.01);
        assert_eq!(source.y, 0.0);
        assert_eq!(source.height, 600.0);
    }

    #[test]
    fn tall_texture_is_cropped_vertically() {
        let source = cover_source(1000.0, 1000.0, Rectangle::new(10.0, 10.0, 1600.0, 900.0));
        assert_eq!(source.x, 0.0);
        assert_eq!(source.width, 1000.0);
        assert!((source.height - 562.5).abs() < 0.01);
        assert!((source.y - 218.75).abs() < 0.01);
    }
}
