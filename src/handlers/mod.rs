mod url;

pub use self::url::{
    create_handler, delete_handler, get_all_handler, home_handler, json_error_handler,
    redirect_handler, short_link_handler,
};
