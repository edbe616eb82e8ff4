// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/model.rs - 模型
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

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::coords::{BoundingBox, PixelCoord};

pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&mut self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, Clone, Default)]
pub struct DetectResult {
  pub items: Box<[BoundingBox]>,
}

impl DetectResult {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// 第一个检测框的中心；分类器不给出左右眼信息，约定取第一个
  pub fn first_center(&self) -> Option<PixelCoord> {
    self.items.first().map(BoundingBox::center)
  }
}

impl From<Vec<BoundingBox>> for DetectResult {
  fn from(items: Vec<BoundingBox>) -> Self {
    Self {
      items: items.into_boxed_slice(),
    }
  }
}

pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;
pub const DEFAULT_MIN_SIZE: i32 = 30;

/// 多尺度检测参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectParams {
  pub scale_factor: f64,
  pub min_neighbors: i32,
  /// 最小检测窗口边长（正方形，像素）
  pub min_size: i32,
}

impl Default for DetectParams {
  fn default() -> Self {
    Self {
      scale_factor: DEFAULT_SCALE_FACTOR,
      min_neighbors: DEFAULT_MIN_NEIGHBORS,
      min_size: DEFAULT_MIN_SIZE,
    }
  }
}

#[derive(Error, Debug, PartialEq)]
#[error("参数 {key} 的取值无效: {value}")]
pub struct InvalidParam {
  pub key: String,
  pub value: String,
}

impl DetectParams {
  /// 从 URL 查询参数中读取，缺省的键保持默认值
  pub fn from_query(url: &Url) -> Result<Self, InvalidParam> {
    let mut params = Self::default();
    for (key, value) in url.query_pairs() {
      let invalid = || InvalidParam {
        key: key.to_string(),
        value: value.to_string(),
      };
      match key.as_ref() {
        "scale_factor" => {
          let v: f64 = value.parse().map_err(|_| invalid())?;
          if !(v > 1.0 && v.is_finite()) {
            return Err(invalid());
          }
          params.scale_factor = v;
        }
        "min_neighbors" => {
          let v: i32 = value.parse().map_err(|_| invalid())?;
          if v < 0 {
            return Err(invalid());
          }
          params.min_neighbors = v;
        }
        "min_size" => {
          let v: i32 = value.parse().map_err(|_| invalid())?;
          if v < 0 {
            return Err(invalid());
          }
          params.min_size = v;
        }
        other => warn!("忽略未知的模型参数: {}={}", other, value),
      }
    }
    Ok(params)
  }
}

#[cfg(feature = "model_cascade")]
mod cascade;
#[cfg(feature = "model_cascade")]
pub use self::cascade::{CascadeDetector, CascadeDetectorBuilder, CascadeError};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_eye_cascade_settings() {
    let params = DetectParams::default();
    assert_eq!(params.scale_factor, 1.1);
    assert_eq!(params.min_neighbors, 5);
    assert_eq!(params.min_size, 30);
  }

  #[test]
  fn query_overrides_defaults() {
    let url = Url::parse("cascade:///x.xml?scale_factor=1.3&min_neighbors=2&min_size=12").unwrap();
    let params = DetectParams::from_query(&url).unwrap();
    assert_eq!(
      params,
      DetectParams {
        scale_factor: 1.3,
        min_neighbors: 2,
        min_size: 12,
      }
    );
  }

  #[test]
  fn partial_query_keeps_other_defaults() {
    let url = Url::parse("cascade:///x.xml?min_neighbors=8&colour=blue").unwrap();
    let params = DetectParams::from_query(&url).unwrap();
    assert_eq!(params.min_neighbors, 8);
    assert_eq!(params.scale_factor, DEFAULT_SCALE_FACTOR);
    assert_eq!(params.min_size, DEFAULT_MIN_SIZE);
  }

  #[test]
  fn invalid_values_are_rejected() {
    for query in [
      "scale_factor=1.0",
      "scale_factor=abc",
      "min_neighbors=-1",
      "min_size=big",
    ] {
      let url = Url::parse(&format!("cascade:///x.xml?{}", query)).unwrap();
      assert!(DetectParams::from_query(&url).is_err(), "{query}");
    }
  }

  #[test]
  fn first_center_uses_first_box() {
    let result = DetectResult::from(vec![
      BoundingBox::new(10, 10, 40, 40),
      BoundingBox::new(200, 10, 40, 40),
    ]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.first_center(), Some(PixelCoord::new(30, 30)));
    assert_eq!(DetectResult::default().first_center(), None);
  }
}
