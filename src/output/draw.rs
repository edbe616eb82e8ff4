// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/output/draw.rs - 眼睛与自定义坐标的标注绘制
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::{coords::PixelCoord, frame::RgbFrame, output::Annotations};

pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

// 标注常量
const EYE_BOX_HALF_SIZE: i32 = 20;
const EYE_BOX_THICKNESS: i32 = 2;
const CUSTOM_DOT_RADIUS: i32 = 10;
const LABEL_OFFSET: i32 = 25;
const LABEL_FONT_SIZE: f32 = 14.0;
const LABEL_TEXT_HEIGHT: i32 = 12;
// 距图像边缘超过该距离的标注不可见，直接跳过
const ANNOTATION_MARGIN: i64 = 256;

const EYE_COLOR: [u8; 3] = [0, 255, 0]; // 绿色
const CUSTOM_COLOR: [u8; 3] = [0, 0, 255]; // 蓝色
const TEXT_COLOR: [u8; 3] = [255, 255, 255]; // 白色

#[derive(Clone)]
pub struct Draw {
  font: Option<FontArc>,
  font_scale: PxScale,
  eye_color: Rgb<u8>,
  custom_color: Rgb<u8>,
  text_color: Rgb<u8>,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      font: None,
      font_scale: PxScale::from(LABEL_FONT_SIZE),
      eye_color: Rgb(EYE_COLOR),
      custom_color: Rgb(CUSTOM_COLOR),
      text_color: Rgb(TEXT_COLOR),
    }
  }
}

impl Draw {
  /// 从字体文件加载标签字体；加载失败时仅绘制图形，不绘制文字
  pub fn with_font_file<P: AsRef<Path>>(mut self, path: P) -> Self {
    let path = path.as_ref();
    self.font = match std::fs::read(path) {
      Ok(data) => match FontArc::try_from_vec(data) {
        Ok(font) => {
          debug!("已加载标签字体: {}", path.display());
          Some(font)
        }
        Err(e) => {
          warn!("字体文件无效 {}: {}，将不绘制标签文字", path.display(), e);
          None
        }
      },
      Err(e) => {
        warn!("无法读取字体文件 {}: {}，将不绘制标签文字", path.display(), e);
        None
      }
    };
    self
  }

  pub fn has_font(&self) -> bool {
    self.font.is_some()
  }

  /// 在帧的副本上绘制标注
  pub fn draw_annotations(&self, frame: &RgbFrame, annotations: &Annotations) -> RgbImage {
    let mut image = frame.image().clone();
    self.draw_annotations_on_image(&mut image, annotations);
    image
  }

  pub fn draw_annotations_on_image(&self, image: &mut RgbImage, annotations: &Annotations) {
    if let Some(eye) = annotations.eye {
      if near_image(image, eye) {
        self.draw_eye_box(image, eye);
        self.draw_label(image, eye, &format!("Eye {}", eye));
      } else {
        debug!("眼睛标注 {} 远离图像，跳过绘制", eye);
      }
    }

    if let Some(custom) = annotations.custom {
      if near_image(image, custom) {
        draw_filled_circle_mut(image, (custom.x, custom.y), CUSTOM_DOT_RADIUS, self.custom_color);
        self.draw_label(image, custom, &format!("Custom {}", custom));
      } else {
        debug!("自定义标注 {} 远离图像，跳过绘制", custom);
      }
    }
  }

  // 线宽 2 跨在名义边上：外圈 ±(HALF+1)，内圈 ±HALF
  fn draw_eye_box(&self, image: &mut RgbImage, center: PixelCoord) {
    for ring in 0..EYE_BOX_THICKNESS {
      let half = EYE_BOX_HALF_SIZE + 1 - ring;
      let side = (2 * half + 1) as u32;
      let rect = Rect::at(center.x - half, center.y - half).of_size(side, side);
      draw_hollow_rect_mut(image, rect, self.eye_color);
    }
  }

  // 文字基线位于锚点右上方 LABEL_OFFSET 处
  fn draw_label(&self, image: &mut RgbImage, anchor: PixelCoord, text: &str) {
    let Some(font) = &self.font else {
      return;
    };
    draw_text_mut(
      image,
      self.text_color,
      anchor.x.saturating_add(LABEL_OFFSET),
      anchor
        .y
        .saturating_sub(LABEL_OFFSET)
        .saturating_sub(LABEL_TEXT_HEIGHT),
      self.font_scale,
      font,
      text,
    );
  }
}

fn near_image(image: &RgbImage, point: PixelCoord) -> bool {
  let (x, y) = (point.x as i64, point.y as i64);
  x >= -ANNOTATION_MARGIN
    && y >= -ANNOTATION_MARGIN
    && x < image.width() as i64 + ANNOTATION_MARGIN
    && y < image.height() as i64 + ANNOTATION_MARGIN
}

#[cfg(test)]
mod tests {
  use super::*;

  fn blank(width: u32, height: u32) -> RgbFrame {
    RgbFrame::from(RgbImage::new(width, height))
  }

  #[test]
  fn eye_box_is_green_and_straddles_nominal_edge() {
    let frame = blank(100, 100);
    let annotations = Annotations {
      eye: Some(PixelCoord::new(50, 50)),
      custom: None,
    };
    let image = Draw::default().draw_annotations(&frame, &annotations);

    let green = Rgb(EYE_COLOR);
    // 名义边 30/70 与其外侧一圈
    assert_eq!(image.get_pixel(29, 29), &green);
    assert_eq!(image.get_pixel(71, 71), &green);
    assert_eq!(image.get_pixel(30, 50), &green);
    assert_eq!(image.get_pixel(70, 50), &green);
    assert_eq!(image.get_pixel(29, 50), &green);
    assert_eq!(image.get_pixel(71, 50), &green);
    // 框内与框外保持原样
    assert_eq!(image.get_pixel(31, 50), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(50, 50), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(28, 50), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(72, 50), &Rgb([0, 0, 0]));
  }

  #[test]
  fn custom_dot_is_filled_blue() {
    let frame = blank(60, 60);
    let annotations = Annotations {
      eye: None,
      custom: Some(PixelCoord::new(30, 30)),
    };
    let image = Draw::default().draw_annotations(&frame, &annotations);

    let blue = Rgb(CUSTOM_COLOR);
    assert_eq!(image.get_pixel(30, 30), &blue);
    assert_eq!(image.get_pixel(35, 30), &blue);
    assert_eq!(image.get_pixel(30, 25), &blue);
    assert_eq!(image.get_pixel(45, 30), &Rgb([0, 0, 0]));
  }

  #[test]
  fn source_frame_is_untouched() {
    let frame = blank(20, 20);
    let annotations = Annotations {
      eye: Some(PixelCoord::new(10, 10)),
      custom: Some(PixelCoord::new(5, 5)),
    };
    let _ = Draw::default().draw_annotations(&frame, &annotations);
    assert!(frame.image().pixels().all(|p| p == &Rgb([0, 0, 0])));
  }

  #[test]
  fn annotations_near_border_are_clipped() {
    let frame = blank(16, 16);
    let annotations = Annotations {
      eye: Some(PixelCoord::new(0, 0)),
      custom: Some(PixelCoord::new(15, 15)),
    };
    let image = Draw::default().draw_annotations(&frame, &annotations);
    assert_eq!(image.dimensions(), (16, 16));
    assert_eq!(image.get_pixel(15, 15), &Rgb(CUSTOM_COLOR));
  }

  #[test]
  fn extreme_coordinates_are_skipped() {
    let frame = blank(16, 16);
    let draw = Draw::default().with_font_file(DEFAULT_FONT_PATH);
    for point in [
      PixelCoord::new(i32::MAX, 0),
      PixelCoord::new(0, i32::MAX),
      PixelCoord::new(i32::MIN, i32::MIN),
    ] {
      let annotations = Annotations {
        eye: Some(point),
        custom: Some(point),
      };
      let image = draw.draw_annotations(&frame, &annotations);
      assert!(image.pixels().all(|p| p == &Rgb([0, 0, 0])));
    }
  }

  #[test]
  fn annotations_just_outside_are_still_clipped_in() {
    let frame = blank(16, 16);
    let annotations = Annotations {
      eye: Some(PixelCoord::new(-10, 8)),
      custom: None,
    };
    let image = Draw::default().draw_annotations(&frame, &annotations);
    // 方框右边 x = -10 + 21 = 11
    assert_eq!(image.get_pixel(11, 8), &Rgb(EYE_COLOR));
  }

  #[test]
  fn labels_are_drawn_when_font_is_available() {
    if !Path::new(DEFAULT_FONT_PATH).is_file() {
      return;
    }
    let draw = Draw::default().with_font_file(DEFAULT_FONT_PATH);
    assert!(draw.has_font());

    let frame = blank(200, 100);
    let annotations = Annotations {
      eye: None,
      custom: Some(PixelCoord::new(20, 60)),
    };
    let with_label = draw.draw_annotations(&frame, &annotations);
    let without_label = Draw::default().draw_annotations(&frame, &annotations);
    // 标签位于 (45, 23) 起的区域，只有加载字体时才出现
    let differs = (45..200)
      .flat_map(|x| (0..40).map(move |y| (x, y)))
      .any(|(x, y)| with_label.get_pixel(x, y) != without_label.get_pixel(x, y));
    assert!(differs);
  }

  #[test]
  fn missing_font_file_disables_labels() {
    let draw = Draw::default().with_font_file("/nonexistent/maoyan/font.ttf");
    assert!(!draw.has_font());
  }

  #[test]
  fn invalid_font_file_disables_labels() {
    let path = std::env::temp_dir().join(format!("maoyan-font-{}.ttf", std::process::id()));
    std::fs::write(&path, b"not a font").unwrap();
    let draw = Draw::default().with_font_file(&path);
    assert!(!draw.has_font());
    std::fs::remove_file(&path).ok();
  }
}
