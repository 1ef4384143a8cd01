/// 푸시 채널(server-sent events) 디코딩
/// 바이트 청크 -> SSE 이벤트 data -> PushMessage
// region:    --- Imports
use crate::auction::events::PushMessage;
use crate::error::AuctionError;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

// endregion: --- Imports

/// 푸시 채널에서 수신한 이벤트 data 스트림
pub type PushStream = BoxStream<'static, Result<String, AuctionError>>;

// region:    --- SSE Decoder
/// 증분 SSE 파서
/// 청크 경계가 줄 중간이어도 완성된 줄만 처리한다.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    event: Option<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 청크를 넣고 완성된 message 이벤트의 data 를 반환
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut dispatched = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(data) = self.process_line(&line) {
                dispatched.push(data);
            }
        }
        dispatched
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        // 주석 (keep-alive)
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");

        match event.as_deref() {
            None | Some("") | Some("message") => Some(data),
            Some(other) => {
                debug!("{:<12} --> 이름 있는 이벤트 무시: {}", "Push", other);
                None
            }
        }
    }
}
// endregion: --- SSE Decoder

// region:    --- Push Stream
/// HTTP 응답 본문을 푸시 스트림으로 변환
pub fn event_stream(response: reqwest::Response) -> PushStream {
    let state = (Box::pin(response.bytes_stream()), SseDecoder::new(), VecDeque::new());

    stream::unfold(state, |(mut bytes, mut decoder, mut pending)| async move {
        loop {
            if let Some(data) = pending.pop_front() {
                return Some((Ok(data), (bytes, decoder, pending)));
            }
            match bytes.next().await {
                Some(Ok(chunk)) => pending.extend(decoder.feed(&chunk)),
                Some(Err(e)) => return Some((Err(AuctionError::Http(e)), (bytes, decoder, pending))),
                None => return None,
            }
        }
    })
    .boxed()
}

/// 이벤트 data 를 PushMessage 로 역직렬화
/// 알 수 없는 `type` 은 무시(None)하고, JSON 자체가 깨졌거나 알려진 종류의 본문이 잘못되면 에러
pub fn decode_message(data: &str) -> Result<Option<PushMessage>, AuctionError> {
    let malformed = |source| AuctionError::MalformedPush {
        payload: data.to_string(),
        source,
    };
    let value: Value = serde_json::from_str(data).map_err(malformed)?;

    let kind = value.get("type").and_then(Value::as_str);
    if !kind.is_some_and(|kind| PushMessage::KINDS.iter().any(|known| *known == kind)) {
        debug!("{:<12} --> 알 수 없는 메시지 종류 무시: {:?}", "Push", kind);
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(malformed)
}
// endregion: --- Push Stream
