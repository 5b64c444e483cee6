//! 页面几何与检测结果
//!
//! 坐标系原点在左上角，单位为对应页面图像的像素。

use serde::{Deserialize, Serialize};

/// 矩形框
///
/// 约定 `width >= 0` 且 `height >= 0`，解析时不做几何校验。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// 右下角坐标
    pub fn max_corner(&self) -> (f64, f64) {
        (self.x + self.width, self.y + self.height)
    }
}

/// 渲染后页面图像的尺寸，与该页所有 bbox 处于同一坐标空间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// 页面上的一个检测结果（二维码、印章等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// 类别，例如 "qr_code"、"stamp"
    pub category: String,
    /// 置信度，取值 [0, 1]
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Detection {
    /// 置信度百分比（用于展示）
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}
