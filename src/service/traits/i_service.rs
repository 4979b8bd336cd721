use std::io;
use crate::models::convert::{ConvertInput, ConvertOutput};
use crate::models::host::{ExportSceneInput, ImportSceneInput};
use crate::models::menu::MenuEntry;

// 宿主服務接口，負責場景與中繼檔之間的轉換（委派給宿主應用，不自行實作格式）
pub trait HostServiceTrait: Send + Sync {
    /// 將場景匯出為 FBX 中繼檔
    /// # 參數
    /// - input: 場景路徑與 FBX 目的路徑
    /// # 回傳
    /// - 成功時返回 ()，失敗時返回 IO 錯誤
    fn export_scene(&self, input: ExportSceneInput) -> io::Result<()>;

    /// 將 Collada 中繼檔匯入場景並另存
    /// # 參數
    /// - input: 中繼檔路徑與場景目的路徑
    /// # 回傳
    /// - 成功時返回 ()，失敗時返回 IO 錯誤
    fn import_scene(&self, input: ImportSceneInput) -> io::Result<()>;
}

// 轉換器服務接口，負責啟動外部 SuperBMD 程序
pub trait ConverterServiceTrait: Send + Sync {
    /// 執行轉換器並等待其結束，逾時或非零結束碼都視為失敗
    /// # 參數
    /// - input: 轉換器路徑、參數列表與逾時設定
    /// # 回傳
    /// - 成功時返回執行結果，失敗時返回 IO 錯誤
    fn convert(&self, input: ConvertInput) -> io::Result<ConvertOutput>;
}

// 選單宿主接口，負責掛載與移除命令的選單項目
pub trait MenuHostTrait {
    fn append_entry(&mut self, entry: MenuEntry);
    fn remove_entry(&mut self, id: &str);
}
