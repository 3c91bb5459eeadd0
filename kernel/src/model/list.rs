// 1 ページ分の一覧と、コレクション全体の件数
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}
