pub mod brigada;

pub mod common;

pub mod employee;

pub mod err;

pub mod leave;

pub mod leave_type;

pub mod location;

pub mod locomotive;

pub mod service_type;

pub mod work_type;
