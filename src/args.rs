// 该文件是 Maoyan （猫眼） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use maoyan::output::draw::DEFAULT_FONT_PATH;

/// Maoyan 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图像，例如 image:///home/user/face%20cat.jpg
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,

  /// 级联分类器，可通过查询参数调整检测参数:
  /// ?scale_factor=1.1&min_neighbors=5&min_size=30
  #[arg(
    long,
    value_name = "MODEL",
    default_value = "cascade:///usr/share/opencv4/haarcascades/haarcascade_eye.xml"
  )]
  pub model: Url,

  /// 输出方式
  /// 支持:
  /// - 窗口: window://display?title=maoyan
  /// - 图片: image:///tmp/annotated.png
  #[arg(long, value_name = "OUTPUT", default_value = "window://display")]
  pub output: Url,

  /// 自定义坐标 x
  #[arg(long, default_value_t = 150, allow_negative_numbers = true)]
  pub custom_x: i32,

  /// 自定义坐标 y
  #[arg(long, default_value_t = 160, allow_negative_numbers = true)]
  pub custom_y: i32,

  /// 标签字体文件
  #[arg(long, value_name = "FILE", default_value = DEFAULT_FONT_PATH)]
  pub font: PathBuf,

  /// 以 JSON 格式输出检测结果
  #[arg(long)]
  pub json: bool,
}
