/*
 * Trail Canvas Module
 *
 * The offscreen texture the particle field paints into. The texture is never
 * cleared between frames: the translucent overlay at the start of every field
 * frame is the only thing that fades what was drawn before, which is what
 * leaves the trails. view() clears the window, draws this texture, and puts
 * the labels, debug panel and egui on top, so none of those reach the trails.
 *
 * The texture is sized in physical pixels. When the window size or scale
 * factor changes it is recreated, and a new texture starts out empty.
 */

use nannou::prelude::*;
use nannou::wgpu;
use tracing::debug;

use crate::renderer::NannouSurface;
use crate::surface::DrawList;

const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

pub struct TrailCanvas {
    texture: wgpu::Texture,
    renderer: nannou::draw::Renderer,
    draw: Draw,
    size: [u32; 2],
    scale_factor: f32,
}

impl TrailCanvas {
    pub fn new(window: &Window) -> Self {
        let (width, height) = window.inner_size_pixels();
        let size = texture_size(width, height);
        let scale_factor = window.scale_factor();
        let device = window.device();

        let texture = wgpu::TextureBuilder::new()
            .size(size)
            .usage(wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING)
            .sample_count(1)
            .format(TEXTURE_FORMAT)
            .build(device);
        let renderer =
            nannou::draw::RendererBuilder::new().build_from_texture_descriptor(device, texture.descriptor());

        debug!(width = size[0], height = size[1], scale_factor, "trail canvas created");

        Self {
            texture,
            renderer,
            draw: Draw::new(),
            size,
            scale_factor,
        }
    }

    // True while the texture still matches the window's pixel size and scale factor
    pub fn fits(&self, window: &Window) -> bool {
        let (width, height) = window.inner_size_pixels();
        self.size == texture_size(width, height) && self.scale_factor == window.scale_factor()
    }

    // Paint a frame's draw calls over whatever the texture already holds
    pub fn paint(&mut self, window: &Window, draw_list: &DrawList) {
        if draw_list.is_empty() {
            return;
        }

        self.draw.reset();
        let target = Rect::from_w_h(self.size[0] as f32, self.size[1] as f32);
        let mut surface = NannouSurface::new(&self.draw, target, self.scale_factor);
        draw_list.replay(&mut surface);

        // No background on this Draw, so the render pass loads the old contents
        let device = window.device();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("trail canvas"),
        });
        self.renderer
            .render_to_texture(device, &mut encoder, &self.draw, &self.texture);
        window.queue().submit(Some(encoder.finish()));
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}

// wgpu rejects zero-sized textures, so a minimized window still gets one pixel
fn texture_size(width: u32, height: u32) -> [u32; 2] {
    [width.max(1), height.max(1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_is_never_zero_sized() {
        assert_eq!(texture_size(1920, 1080), [1920, 1080]);
        assert_eq!(texture_size(0, 600), [1, 600]);
        assert_eq!(texture_size(0, 0), [1, 1]);
    }
}
