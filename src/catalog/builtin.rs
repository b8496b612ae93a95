//! The shipped story: "Bà Hoa & Quán Khiêu Vũ".
//!
//! A coffee vendor at the afternoon market strikes up a conversation and
//! invites you to the Hoa Hoa dance club.

use super::SceneDescriptor;

/// Title shown in the player header and `scenes` listing.
pub const STORY_TITLE: &str = "Bà Hoa & Quán Khiêu Vũ";

pub(super) fn scenes() -> Vec<SceneDescriptor> {
    vec![
        SceneDescriptor::new(
            "market",
            "Chợ chiều vắng khách",
            "Bà Hoa ngồi bên xe cà phê của mình, mong có người ghé",
            3500,
        ),
        SceneDescriptor::new(
            "conversation",
            "Nụ cười thân quen",
            "Bà bắt chuyện với bạn, mời ly cà phê đậm tình",
            3200,
        ),
        SceneDescriptor::new(
            "invitation",
            "Lời mời bất ngờ",
            "\"Chiều nay rảnh chứ? Vô Khiêu vũ Hoa Hoa với bà cho vui!\"",
            3200,
        ),
        SceneDescriptor::new(
            "club-exterior",
            "Ánh đèn Hoa Hoa",
            "Tấm bảng neon sáng lên, ngân nga điệu bolero",
            3200,
        ),
        SceneDescriptor::new(
            "club-interior",
            "Nhịp điệu thăng hoa",
            "Sàn nhảy mở rộng vòng tay đón chào mọi người",
            3600,
        ),
    ]
}
