pub mod company_nav;
pub mod difficulty_badge;
pub mod pager;
pub mod question_item;
