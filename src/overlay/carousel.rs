use std::time::Duration;

/// 이미지 교체 주기
pub const ROTATE_INTERVAL: Duration = Duration::from_secs(20);

/// 현재 상품 이미지 순환
/// 이미지가 없으면 대기 화면 이미지를 보여준다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCarousel {
    standby: String,
    images: Vec<String>,
    index: usize,
}

impl ImageCarousel {
    pub fn new(standby: impl Into<String>) -> Self {
        Self {
            standby: standby.into(),
            images: Vec::new(),
            index: 0,
        }
    }

    /// 상품이 바뀌면 첫 이미지부터 다시 시작
    pub fn show(&mut self, images: &[String]) {
        self.images = images.to_vec();
        self.index = 0;
    }

    pub fn clear(&mut self) {
        self.show(&[]);
    }

    /// 다음 이미지로 이동, 이미지가 1장 이하면 그대로
    pub fn advance(&mut self) -> bool {
        if self.images.len() <= 1 {
            return false;
        }
        self.index = (self.index + 1) % self.images.len();
        true
    }

    pub fn current(&self) -> &str {
        self.images
            .get(self.index)
            .map(String::as_str)
            .unwrap_or(self.standby.as_str())
    }
}
