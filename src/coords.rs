// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/coords.rs - 像素坐标与检测框
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

use std::fmt;

/// 图像上的一个像素位置（列, 行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
  pub x: i32,
  pub y: i32,
}

impl PixelCoord {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// 是否落在 width x height 的图像内
  pub fn within(&self, width: u32, height: u32) -> bool {
    self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
  }
}

impl From<(i32, i32)> for PixelCoord {
  fn from((x, y): (i32, i32)) -> Self {
    Self { x, y }
  }
}

impl From<PixelCoord> for (i32, i32) {
  fn from(coord: PixelCoord) -> Self {
    (coord.x, coord.y)
  }
}

impl fmt::Display for PixelCoord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(x: {}, y: {})", self.x, self.y)
  }
}

/// 像素位置到坐标的换算，两者同为左上角原点，因此是恒等映射
pub fn pixel_to_coordinates(px: i32, py: i32) -> PixelCoord {
  PixelCoord::new(px, py)
}

/// 轴对齐的检测框，单位为像素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
}

impl BoundingBox {
  pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// 框的近似中心，宽高按整数截断取半
  pub fn center(&self) -> PixelCoord {
    PixelCoord::new(self.x + self.width / 2, self.y + self.height / 2)
  }
}
