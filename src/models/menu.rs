#[derive(Clone, PartialEq, Debug)]
pub enum MenuLocation {
    FileExport,
    FileImport,
}

#[derive(Clone, Debug)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub location: MenuLocation,
}
