pub mod alert_dto;

pub use alert_dto::{
    AlertRequest, AlertResponseDto, CreateAlertDto, LocationDto, LocationResponseDto,
};
