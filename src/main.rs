// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use maoyan::{
  FromUrl,
  coords::PixelCoord,
  input::InputWrapper,
  model::CascadeDetectorBuilder,
  output::{OutputWrapper, draw::Draw},
  report::ReportFormat,
  task::{EyeLocateTask, Task, report_detection_failure},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt().with_writer(std::io::stderr).init();

  let args = args::Args::parse();

  info!("输入来源: {}", args.input);
  info!("模型文件路径: {}", args.model);
  info!("输出路径: {}", args.output);

  // 输出方式错误属于命令行错误，直接返回
  let output = OutputWrapper::from_url(&args.output)?
    .with_draw(Draw::default().with_font_file(&args.font));

  let input = match InputWrapper::from_url(&args.input) {
    Ok(input) => {
      info!("输入图像尺寸: {}x{}", input.width(), input.height());
      input
    }
    Err(e) => return detection_failed(format_args!("Could not load image from {}: {}", args.input, e)),
  };

  let model = match CascadeDetectorBuilder::from_url(&args.model).and_then(|b| b.build()) {
    Ok(model) => model,
    Err(e) => return detection_failed(format_args!("Could not load eye cascade classifier: {}", e)),
  };

  let format = if args.json {
    ReportFormat::Json
  } else {
    ReportFormat::Text
  };
  let task = EyeLocateTask::new(PixelCoord::new(args.custom_x, args.custom_y)).with_format(format);

  match task.run_task(input, model, output) {
    Ok(_) => Ok(()),
    Err(e) => detection_failed(format_args!("{}", e)),
  }
}

// 检测失败后以状态码 0 退出
fn detection_failed(reason: std::fmt::Arguments<'_>) -> Result<()> {
  report_detection_failure(&mut std::io::stdout().lock(), &reason)?;
  Ok(())
}
