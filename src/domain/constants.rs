//! Portal wire constants
//!
//! Values the CampusNet dispatcher expects verbatim. They are part of the
//! portal's protocol, not configuration.

/// Dispatcher endpoint and fixed URL arguments
pub mod portal {
    /// Default deployment (DHBW Dualis)
    pub const DEFAULT_BASE_URL: &str = "https://dualis.dhbw.de/";

    /// Single dispatch endpoint, relative to the base URL
    pub const DISPATCH_PATH: &str = "scripts/mgrqispi.dll";

    pub const APP_NAME: &str = "CampusNet";

    /// Menu id sent with every request. Only affects which menu entry the
    /// portal highlights, so the home entry is used throughout.
    pub const HOME_MENU_ID: &str = "00019";
}

/// `PRGNAME` values
pub mod programs {
    pub const LOGIN_CHECK: &str = "LOGINCHECK";
    pub const COURSE_RESULTS: &str = "COURSERESULTS";
    pub const RESULT_DETAILS: &str = "RESULTDETAILS";
    pub const CREATE_DOCUMENT: &str = "CREATEDOCUMENT";
}

/// Form fields of the login POST
pub mod login {
    pub const ARGUMENTS: &str = "clino,usrname,pass,menuno,menu_type,browser,platform";
    pub const CLIENT_NO: &str = "000000000000001";
    pub const MENU_NO: &str = "000324";
    pub const MENU_TYPE: &str = "classic";
}

/// Form fields of the per-semester results POST
pub mod course_results {
    pub const ARGUMENTS: &str = "sessionno,menuno,semester";
    pub const MENU_NO: &str = "000307";
    pub const REFRESH: &str = "Aktualisieren";
}
