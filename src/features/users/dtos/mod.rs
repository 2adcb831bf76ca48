pub mod profile_dto;

pub use profile_dto::{
    ChangePasswordDto, PasswordChange, PasswordChangedResponseDto, UpdateProfileDto,
    UserProfileResponseDto,
};
