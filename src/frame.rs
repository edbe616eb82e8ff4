// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/frame.rs - RGB 帧定义
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

use image::RgbImage;
#[cfg(any(feature = "model_cascade", feature = "window_output"))]
use opencv::{
  core::{Mat, VecN},
  imgproc,
  prelude::*,
};

const RGB_CHANNELS: usize = 3;

#[derive(Debug, Clone)]
pub struct RgbFrame {
  image: RgbImage,
}

impl From<RgbImage> for RgbFrame {
  fn from(image: RgbImage) -> Self {
    Self { image }
  }
}

impl RgbFrame {
  pub fn height(&self) -> u32 {
    self.image.height()
  }

  pub fn width(&self) -> u32 {
    self.image.width()
  }

  pub fn channels(&self) -> usize {
    RGB_CHANNELS
  }

  pub fn image(&self) -> &RgbImage {
    &self.image
  }
}

/// 以 CV_8UC3（RGB 通道顺序）构造 OpenCV 矩阵
#[cfg(any(feature = "model_cascade", feature = "window_output"))]
pub fn rgb_mat(image: &RgbImage) -> opencv::Result<Mat> {
  let pixels: Vec<VecN<u8, 3>> = image.pixels().map(|p| VecN(p.0)).collect();
  Mat::from_slice_rows_cols(
    pixels.as_slice(),
    image.height() as usize,
    image.width() as usize,
  )
}

/// 用 OpenCV 做颜色空间转换，`code` 为 `imgproc::COLOR_RGB2*`
#[cfg(any(feature = "model_cascade", feature = "window_output"))]
pub fn convert_rgb(image: &RgbImage, code: i32) -> opencv::Result<Mat> {
  let src = rgb_mat(image)?;
  let mut dst = Mat::default();
  imgproc::cvt_color(&src, &mut dst, code, 0)?;
  Ok(dst)
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::Rgb;

  #[test]
  fn reports_shape() {
    let frame = RgbFrame::from(RgbImage::new(4, 2));
    assert_eq!((frame.width(), frame.height(), frame.channels()), (4, 2, 3));
  }

  #[cfg(any(feature = "model_cascade", feature = "window_output"))]
  fn frame_2x1() -> RgbImage {
    let mut image = RgbImage::new(2, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([10, 20, 30]));
    image
  }

  #[cfg(any(feature = "model_cascade", feature = "window_output"))]
  #[test]
  fn gray_conversion_uses_opencv_weights() {
    let gray = convert_rgb(&frame_2x1(), imgproc::COLOR_RGB2GRAY).unwrap();
    assert_eq!((gray.rows(), gray.cols(), gray.channels()), (1, 2, 1));
    // 0.299 * 255 = 76.2
    assert_eq!(*gray.at_2d::<u8>(0, 0).unwrap(), 76);
    // 2.99 + 11.74 + 3.42 = 18.15
    assert_eq!(*gray.at_2d::<u8>(0, 1).unwrap(), 18);
  }

  #[cfg(any(feature = "model_cascade", feature = "window_output"))]
  #[test]
  fn bgr_conversion_swaps_red_and_blue() {
    let bgr = convert_rgb(&frame_2x1(), imgproc::COLOR_RGB2BGR).unwrap();
    assert_eq!(bgr.data_bytes().unwrap(), &[0, 0, 255, 30, 20, 10]);
  }

  #[test]
  fn keeps_pixels() {
    let mut image = RgbImage::new(1, 1);
    image.put_pixel(0, 0, Rgb([1, 2, 3]));
    let frame = RgbFrame::from(image);
    assert_eq!(frame.image().get_pixel(0, 0), &Rgb([1, 2, 3]));
  }
}
