// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/output/window.rs - OpenCV 窗口显示
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

use opencv::{highgui, imgproc};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::{RgbFrame, convert_rgb},
  output::{Annotations, Render, draw::Draw},
};

const DEFAULT_WINDOW_TITLE: &str = "maoyan";

#[derive(Error, Debug)]
pub enum WindowOutputError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("OpenCV 错误: {0}")]
  OpenCv(#[from] opencv::Error),
}

pub struct WindowOutput {
  title: String,
  draw: Draw,
}

impl FromUrlWithScheme for WindowOutput {
  const SCHEME: &'static str = "window";
}

impl FromUrl for WindowOutput {
  type Error = WindowOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(WindowOutputError::SchemeMismatch(uri.scheme().to_string()));
    }

    let title = uri
      .query_pairs()
      .find(|(key, _)| key == "title")
      .map(|(_, value)| value.into_owned())
      .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string());

    Ok(WindowOutput {
      title,
      draw: Draw::default(),
    })
  }
}

impl WindowOutput {
  pub fn with_draw(mut self, draw: Draw) -> Self {
    self.draw = draw;
    self
  }

  pub fn title(&self) -> &str {
    &self.title
  }
}

impl Render<RgbFrame, Annotations> for WindowOutput {
  type Error = WindowOutputError;

  fn render_result(&self, frame: &RgbFrame, result: &Annotations) -> Result<(), Self::Error> {
    let annotated = self.draw.draw_annotations(frame, result);

    // highgui 按 BGR 解释像素
    let mat = convert_rgb(&annotated, imgproc::COLOR_RGB2BGR)?;

    info!("显示标注结果，按任意键关闭窗口");
    highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
    highgui::imshow(&self.title, &mat)?;
    highgui::wait_key(0)?;
    highgui::destroy_window(&self.title)?;

    Ok(())
  }
}
