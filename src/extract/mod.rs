//! 抽取与规整引擎的共享原语
//!
//! - `normalize`：空白折叠、噪音行、选项尾部模板
//! - `options`：选项拆分
//! - `answers`：官方答案解析
//! - `grid`：表格单选按钮解析
//! - `markup`：标记树读取

pub mod answers;
pub mod grid;
pub mod markup;
pub mod normalize;
pub mod options;

pub use answers::{explode_answer_blob, first_choice, parse_dropdown_answers, parse_two_part_answers};
pub use grid::{
    parse_binary_grid, parse_di_grid, parse_multi_choice_grid, parse_tristate_grid, scan_grid,
    scan_grid_with_header, BinaryStatement, Grid, GridCell, GridRow,
};
pub use normalize::{cut_at_spoiler, normalize, strip_noise, strip_trailing_boilerplate};
pub use options::{split_dashed_options, split_options};
