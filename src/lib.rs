//! time-to-target
//!
//! 刺激ごとのTextGridから、ファイル名と同じラベルの区間長を取り出して
//! 一覧ファイルに追記する

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod output;
pub mod scanner;
pub mod textgrid;
