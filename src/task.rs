// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/task.rs - 眼睛定位任务
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

use std::fmt::Display;
use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
  coords::PixelCoord,
  frame::RgbFrame,
  model::{DetectResult, Model},
  output::{Annotations, Render},
  report::{EyeReport, ReportFormat},
};

/// 检测失败时在标准输出打印的提示
pub const DETECTION_FAILED: &str = "Failed to detect eye.";

/// 检测失败不视为程序错误：记录原因并打印提示，调用方随后正常退出
pub fn report_detection_failure<W: Write>(out: &mut W, reason: &dyn Display) -> io::Result<()> {
  error!("{}", reason);
  writeln!(out, "{}", DETECTION_FAILED)
}

pub trait Task<I, M, O>: Sized {
  type Output;
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error>;
}

#[derive(Error, Debug)]
pub enum EyeLocateError {
  #[error("没有输入帧")]
  NoInputFrame,
  #[error("推理失败: {0}")]
  Inference(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("No eyes detected in the image.")]
  NoEyeDetected,
}

/// 单帧眼睛定位：检测、打印报告、渲染标注
#[derive(Debug, Clone, Copy)]
pub struct EyeLocateTask {
  custom: PixelCoord,
  format: ReportFormat,
}

impl EyeLocateTask {
  pub fn new(custom: PixelCoord) -> Self {
    Self {
      custom,
      format: ReportFormat::default(),
    }
  }

  pub fn with_format(mut self, format: ReportFormat) -> Self {
    self.format = format;
    self
  }
}

impl<
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = RgbFrame>,
  M: Model<Input = RgbFrame, Output = DetectResult, Error = ME>,
  O: Render<RgbFrame, Annotations, Error = RE>,
> Task<I, M, O> for EyeLocateTask
{
  type Output = EyeReport;
  type Error = EyeLocateError;

  fn run_task(self, mut input: I, mut model: M, output: O) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or(EyeLocateError::NoInputFrame)?;
    info!("输入帧获取成功，开始推理...");

    let now = std::time::Instant::now();
    let result = model
      .infer(&frame)
      .map_err(|e| EyeLocateError::Inference(Box::new(e)))?;
    info!("推理完成，耗时: {:.2?}，检测到 {} 个区域", now.elapsed(), result.len());

    if result.is_empty() {
      warn!("图像中未检测到眼睛");
      return Err(EyeLocateError::NoEyeDetected);
    }
    let eye = result.first_center().ok_or(EyeLocateError::NoEyeDetected)?;
    debug!("取第一个检测框作为眼睛: {:?}", result.items[0]);

    if !self.custom.within(frame.width(), frame.height()) {
      warn!(
        "自定义坐标 {} 超出图像范围 {}x{}",
        self.custom,
        frame.width(),
        frame.height()
      );
    }

    let report = EyeReport {
      eye,
      custom: self.custom,
      regions: result.items.to_vec(),
    };
    println!("{}", report.render(self.format));

    let annotations = Annotations {
      eye: Some(eye),
      custom: Some(self.custom),
    };
    // 显示失败只记录，不影响已得到的检测结果
    match output.render_result(&frame, &annotations) {
      Ok(()) => info!("渲染完成"),
      Err(e) => error!("渲染失败: {}", e),
    }

    Ok(report)
  }
}
