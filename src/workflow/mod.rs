pub mod home_page;
pub mod inventory_page;
pub mod page_ctx;
pub mod page_state;
pub mod report_page;
pub mod review_page;
pub mod upload_page;

pub use home_page::{HomePage, HomeView};
pub use inventory_page::{InventoryPage, InventoryView};
pub use page_ctx::{PageCtx, Route};
pub use page_state::{PageState, PollPolicy, SessionLoader};
pub use report_page::ReportPage;
pub use review_page::{ReviewPage, ReviewView};
pub use upload_page::{UploadPage, UploadTab};
