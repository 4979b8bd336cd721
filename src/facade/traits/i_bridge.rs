use std::io;
use crate::models::request::{ExportInput, ExportOutput, ImportInput, ImportOutput};

// 橋接門面接口，對外提供匯出與匯入兩個命令
pub trait BridgeFacadeTrait {
    /// 將場景匯出為 BMD
    /// # 參數
    /// - input: 場景路徑、目的路徑與轉換選項
    /// # 回傳
    /// - 成功時返回產出的 BMD 路徑，失敗時返回 IO 錯誤
    fn execute_export(&self, input: ExportInput) -> io::Result<ExportOutput>;

    /// 由 BMD 匯入場景
    /// # 參數
    /// - input: 來源 BMD 路徑與場景目的路徑
    /// # 回傳
    /// - 成功時返回另存的場景路徑，失敗時返回 IO 錯誤
    fn execute_import(&self, input: ImportInput) -> io::Result<ImportOutput>;
}
