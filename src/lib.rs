//! sente - 围棋实时分析服务库
//!
//! 模块结构：
//! - board: 棋盘模型（Loc, Vertex, AnalysisBounds, RegionBounds）
//! - analysis: 分析协议数据模型与区域过滤
//! - engine: 引擎子进程管理（JSON line 协议）
//! - config: 配置加载
//! - logging: tracing 初始化

pub mod analysis;
pub mod board;
pub mod config;
pub mod engine;
pub mod logging;
