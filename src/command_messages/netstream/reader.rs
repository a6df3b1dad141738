//! Reading [`NetStreamCommand`].

use super::{NetStreamCommand, NetStreamCommandPublishType};
use crate::amf0::Amf0Decoder;
use crate::command_messages::error::CommandError;

impl NetStreamCommand {
    /// Reads a [`NetStreamCommand`] from the given decoder, having already consumed the command
    /// name and transaction id.
    ///
    /// Returns `Ok(None)` if `command_name` is not recognized.
    pub fn read(command_name: &str, decoder: &mut Amf0Decoder) -> Result<Option<Self>, CommandError> {
        match command_name {
            "publish" => {
                decoder.decode_null()?;
                let publishing_name = decoder.decode_string()?;
                let publishing_type = decoder
                    .decode_string()
                    .map(|s| NetStreamCommandPublishType::from_str(&s))
                    .unwrap_or(NetStreamCommandPublishType::Live);
                Ok(Some(Self::Publish {
                    publishing_name,
                    publishing_type,
                }))
            }
            "deleteStream" => {
                decoder.decode_null()?;
                let stream_id = decoder.decode_number()?;
                Ok(Some(Self::DeleteStream { stream_id }))
            }
            "FCUnpublish" => {
                decoder.decode_null()?;
                let stream_name = decoder.decode_string()?;
                Ok(Some(Self::FcUnpublish { stream_name }))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::Amf0Encoder;

    #[test]
    fn read_publish_live() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_null(&mut buf).unwrap();
        Amf0Encoder::encode_string(&mut buf, "mystream").unwrap();
        Amf0Encoder::encode_string(&mut buf, "live").unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let command = NetStreamCommand::read("publish", &mut decoder).unwrap().unwrap();
        assert_eq!(
            command,
            NetStreamCommand::Publish {
                publishing_name: "mystream".to_string(),
                publishing_type: NetStreamCommandPublishType::Live,
            }
        );
    }

    #[test]
    fn read_delete_stream() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_null(&mut buf).unwrap();
        Amf0Encoder::encode_number(&mut buf, 1.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let command = NetStreamCommand::read("deleteStream", &mut decoder).unwrap().unwrap();
        assert_eq!(command, NetStreamCommand::DeleteStream { stream_id: 1.0 });
    }

    #[test]
    fn unrecognized_name_is_none() {
        let mut decoder = Amf0Decoder::new(&[]);
        assert!(NetStreamCommand::read("play", &mut decoder).unwrap().is_none());
    }
}
