// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/model/cascade.rs - 级联分类器检测
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

use opencv::{
  core::{Rect, Size, Vector},
  imgproc,
  objdetect::CascadeClassifier,
  prelude::*,
};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  coords::BoundingBox,
  decoded_path,
  frame::{RgbFrame, convert_rgb},
  model::{DetectParams, DetectResult, InvalidParam, Model},
};

#[derive(Error, Debug)]
pub enum CascadeError {
  #[error("模型路径必须使用 {0} 方案")]
  SchemeMismatch(&'static str),
  #[error("无法加载级联分类器: {0}")]
  ClassifierLoad(String),
  #[error("{0}")]
  InvalidParam(#[from] InvalidParam),
  #[error("OpenCV 错误: {0}")]
  OpenCv(#[from] opencv::Error),
}

pub struct CascadeDetectorBuilder {
  model_path: String,
  params: DetectParams,
}

impl FromUrlWithScheme for CascadeDetectorBuilder {
  const SCHEME: &'static str = "cascade";
}

impl FromUrl for CascadeDetectorBuilder {
  type Error = CascadeError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(CascadeError::SchemeMismatch(Self::SCHEME));
    }

    Ok(CascadeDetectorBuilder {
      model_path: decoded_path(url),
      params: DetectParams::from_query(url)?,
    })
  }
}

impl CascadeDetectorBuilder {
  pub fn build(self) -> Result<CascadeDetector, CascadeError> {
    info!("加载级联分类器: {}", self.model_path);
    // OpenCV 对不存在的文件只返回空分类器，这里先行检查以给出明确错误
    if !Path::new(&self.model_path).is_file() {
      error!("级联分类器文件不存在: {}", self.model_path);
      return Err(CascadeError::ClassifierLoad(self.model_path));
    }

    let classifier = CascadeClassifier::new(&self.model_path)?;
    if classifier.empty()? {
      error!("级联分类器为空: {}", self.model_path);
      return Err(CascadeError::ClassifierLoad(self.model_path));
    }

    debug!("检测参数: {:?}", self.params);
    info!("级联分类器加载完成");
    Ok(CascadeDetector {
      classifier,
      params: self.params,
    })
  }
}

pub struct CascadeDetector {
  classifier: CascadeClassifier,
  params: DetectParams,
}

impl Model for CascadeDetector {
  type Input = RgbFrame;
  type Output = DetectResult;
  type Error = CascadeError;

  fn infer(&mut self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    debug!("转换为灰度图");
    let gray = convert_rgb(input.image(), imgproc::COLOR_RGB2GRAY)?;

    debug!("执行多尺度检测");
    let mut objects = Vector::<Rect>::new();
    self.classifier.detect_multi_scale(
      &gray,
      &mut objects,
      self.params.scale_factor,
      self.params.min_neighbors,
      0,
      Size::new(self.params.min_size, self.params.min_size),
      Size::default(),
    )?;

    let items: Vec<BoundingBox> = objects
      .iter()
      .map(|r| BoundingBox::new(r.x, r.y, r.width, r.height))
      .collect();

    debug!("检测到 {} 个区域: {:?}", items.len(), items);
    Ok(DetectResult::from(items))
  }
}
