//! 将客户端请求映射为上游模拟请求

use super::error::QuoteError;
use super::types::{ClientQuoteRequest, ShipperIdentity, Volume};
use super::upstream::{Dispatcher, PricingRequest, Recipient, Returns, Shipper};

/// 收件人类型：固定为 0（个人）
const RECIPIENT_TYPE: i32 = 0;
/// 仅支持巴西境内运输
const RECIPIENT_COUNTRY: &str = "BRA";
/// 唯一的模拟模式
const SIMULATION_TYPE: i32 = 0;

/// 构建上游请求
///
/// 纯函数：不做 I/O，不引入时间戳等非确定性字段。
/// 每个请求只生成一个 dispatcher，携带全部货物并重新计算单价。
pub fn build(
    req: &ClientQuoteRequest,
    origin: &ShipperIdentity,
) -> Result<PricingRequest, QuoteError> {
    let zipcode = parse_zipcode(req.zipcode());

    let volumes = req
        .volumes
        .iter()
        .enumerate()
        .map(|(index, volume)| with_unitary_price(index, volume))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PricingRequest {
        shipper: Shipper {
            registered_number: origin.registered_number.clone(),
            token: origin.token.clone(),
            platform_code: origin.platform_code.clone(),
        },
        recipient: Recipient {
            recipient_type: RECIPIENT_TYPE,
            country: RECIPIENT_COUNTRY.to_string(),
            zipcode,
        },
        dispatchers: vec![Dispatcher {
            registered_number: origin.registered_number.clone(),
            zipcode,
            volumes,
        }],
        simulation_type: vec![SIMULATION_TYPE],
        returns: Returns::default(),
    })
}

/// 邮编字符串转整数，解析失败时回退为 0
///
/// 上游会收到 zipcode 0 并自行拒绝或返回空报价；这里只记录告警，不中断构建。
pub fn parse_zipcode(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(zipcode) => zipcode,
        Err(e) => {
            tracing::warn!(zipcode = %raw, "邮编解析失败，按 0 提交: {}", e);
            0
        }
    }
}

/// 单价 = 总价 / 数量，向零截断
fn with_unitary_price(index: usize, volume: &Volume) -> Result<Volume, QuoteError> {
    if volume.amount == 0 {
        return Err(QuoteError::ZeroAmount { index });
    }

    let mut volume = volume.clone();
    volume.unitary_price = (volume.price / volume.amount as f64).trunc();
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::types::{Address, RecipientQuote};

    fn identity() -> ShipperIdentity {
        ShipperIdentity {
            registered_number: "25438296000158".to_string(),
            token: "1d52a9b6b78cf07b08586152459a5c90".to_string(),
            platform_code: "5AKVkHqCn".to_string(),
        }
    }

    fn volume(amount: i64, price: f64) -> Volume {
        Volume {
            category: "7".to_string(),
            amount,
            unitary_weight: Some(5.0),
            price,
            sku: "abc-teste-123".to_string(),
            height: 0.2,
            width: 0.2,
            length: 0.2,
            unitary_price: 0.0,
        }
    }

    fn request(zipcode: &str, volumes: Vec<Volume>) -> ClientQuoteRequest {
        ClientQuoteRequest {
            recipient: RecipientQuote {
                address: Address {
                    zipcode: zipcode.to_string(),
                },
            },
            volumes,
        }
    }

    #[test]
    fn test_build_fixed_fields() {
        let built = build(&request("12345", vec![volume(1, 100.0)]), &identity()).unwrap();

        assert_eq!(built.shipper.registered_number, "25438296000158");
        assert_eq!(built.shipper.token, "1d52a9b6b78cf07b08586152459a5c90");
        assert_eq!(built.shipper.platform_code, "5AKVkHqCn");
        assert_eq!(built.recipient.recipient_type, 0);
        assert_eq!(built.recipient.country, "BRA");
        assert_eq!(built.recipient.zipcode, 12345);
        assert_eq!(built.simulation_type, vec![0]);
        assert_eq!(built.returns, Returns::default());
        assert!(!built.returns.composition);
        assert!(!built.returns.volumes);
        assert!(!built.returns.applied_rules);

        assert_eq!(built.dispatchers.len(), 1);
        let dispatcher = &built.dispatchers[0];
        assert_eq!(dispatcher.registered_number, "25438296000158");
        assert_eq!(dispatcher.zipcode, 12345);
        assert_eq!(dispatcher.volumes.len(), 1);
        assert_eq!(dispatcher.volumes[0].unitary_price, 100.0);
    }

    #[test]
    fn test_unitary_price_truncates() {
        let req = request(
            "01310930",
            vec![volume(1, 100.0), volume(4, 100.0), volume(3, 100.0)],
        );
        let built = build(&req, &identity()).unwrap();
        let prices: Vec<f64> = built.dispatchers[0]
            .volumes
            .iter()
            .map(|v| v.unitary_price)
            .collect();

        assert_eq!(prices, vec![100.0, 25.0, 33.0]);
    }

    #[test]
    fn test_volumes_copied_in_order() {
        let mut second = volume(2, 50.0);
        second.sku = "second".to_string();
        let req = request("01310930", vec![volume(1, 10.0), second]);

        let built = build(&req, &identity()).unwrap();
        let volumes = &built.dispatchers[0].volumes;
        assert_eq!(volumes[0].sku, "abc-teste-123");
        assert_eq!(volumes[1].sku, "second");
        assert_eq!(volumes[1].price, 50.0);
        // 原请求不受影响
        assert_eq!(req.volumes[1].unitary_price, 0.0);
    }

    #[test]
    fn test_zipcode_with_leading_zero() {
        let built = build(&request("01310930", vec![volume(1, 1.0)]), &identity()).unwrap();
        assert_eq!(built.recipient.zipcode, 1310930);
        assert_eq!(built.dispatchers[0].zipcode, 1310930);
    }

    #[test]
    fn test_unparsable_zipcode_falls_back_to_zero() {
        for raw in ["01310-930", "abc", " 12345", ""] {
            let built = build(&request(raw, vec![volume(1, 1.0)]), &identity()).unwrap();
            assert_eq!(built.recipient.zipcode, 0, "zipcode {raw:?}");
            assert_eq!(built.dispatchers[0].zipcode, 0);
        }
    }

    #[test]
    fn test_zero_amount_fails_fast() {
        let req = request("12345", vec![volume(1, 1.0), volume(0, 1.0)]);
        match build(&req, &identity()) {
            Err(QuoteError::ZeroAmount { index }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let req = request("12345", vec![volume(3, 100.0)]);
        let first = serde_json::to_vec(&build(&req, &identity()).unwrap()).unwrap();
        let second = serde_json::to_vec(&build(&req, &identity()).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
