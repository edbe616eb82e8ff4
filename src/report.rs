// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/report.rs - 检测结果报告
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

use serde_json::{Value, json};

use crate::coords::{BoundingBox, PixelCoord, pixel_to_coordinates};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EyeReport {
  pub eye: PixelCoord,
  pub custom: PixelCoord,
  pub regions: Vec<BoundingBox>,
}

impl EyeReport {
  pub fn lines(&self) -> Vec<String> {
    let eye_px = pixel_to_coordinates(self.eye.x, self.eye.y);
    let custom_px = pixel_to_coordinates(self.custom.x, self.custom.y);
    vec![
      format!("Eye pixel location: (px: {}, py: {})", self.eye.x, self.eye.y),
      format!(
        "Cat's left eye approximate center coordinates: {}",
        self.eye
      ),
      format!("Eye pixel location: (px: {}, py: {})", eye_px.x, eye_px.y),
      format!(
        "Custom pixel location: (px: {}, py: {})",
        custom_px.x, custom_px.y
      ),
      format!("Custom coordinates: {}", self.custom),
    ]
  }

  pub fn to_json(&self) -> Value {
    let regions: Vec<Value> = self
      .regions
      .iter()
      .map(|r| json!({ "x": r.x, "y": r.y, "width": r.width, "height": r.height }))
      .collect();
    json!({
      "eye": { "x": self.eye.x, "y": self.eye.y },
      "custom": { "x": self.custom.x, "y": self.custom.y },
      "regions": regions,
    })
  }

  pub fn render(&self, format: ReportFormat) -> String {
    match format {
      ReportFormat::Text => self.to_string(),
      ReportFormat::Json => self.to_json().to_string(),
    }
  }
}

impl fmt::Display for EyeReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.lines().join("\n"))
  }
}
