use crate::error::Error;
use crate::types::FeeRatio;

/// Currency split computed when the admin closes the pool
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeSplit {
    /// Sent to the platform (poolbase) payout wallet
    pub poolbase_fee: i128,
    /// Paid to the admin payout wallet, or credited as a contribution
    pub admin_fee: i128,
    /// Sent to the payout target
    pub payout: i128,
}

/// Reject ratios that cannot be applied to a balance
///
/// Each ratio needs a non-zero denominator and must not exceed 1, and the
/// two fees together must not exceed 1 so the payout never goes negative.
pub fn validate_ratios(poolbase_fee: &FeeRatio, admin_fee: &FeeRatio) -> Result<(), Error> {
    validate_ratio(poolbase_fee)?;
    validate_ratio(admin_fee)?;

    // p_num/p_den + a_num/a_den <= 1  <=>  p_num*a_den + a_num*p_den <= p_den*a_den
    let lhs = (poolbase_fee.numerator as u64) * (admin_fee.denominator as u64)
        + (admin_fee.numerator as u64) * (poolbase_fee.denominator as u64);
    let rhs = (poolbase_fee.denominator as u64) * (admin_fee.denominator as u64);
    if lhs > rhs {
        return Err(Error::InvalidParams);
    }
    Ok(())
}

pub fn validate_ratio(ratio: &FeeRatio) -> Result<(), Error> {
    if ratio.denominator == 0 || ratio.numerator > ratio.denominator {
        return Err(Error::InvalidParams);
    }
    Ok(())
}

/// Fee on `total` rounded toward zero
///
/// Formula: fee = floor(total × numerator / denominator)
///
/// Example:
/// - total: 10, ratio: 2/5
/// - fee: 10 × 2 / 5 = 4
pub fn fee_amount(total: i128, ratio: &FeeRatio) -> Result<i128, Error> {
    if ratio.denominator == 0 {
        return Err(Error::InvalidParams);
    }
    total
        .checked_mul(ratio.numerator as i128)
        .ok_or(Error::Overflow)?
        .checked_div(ratio.denominator as i128)
        .ok_or(Error::Overflow)
}

/// Split the pool balance between platform, admin and payout target
///
/// The payout absorbs every rounding remainder, so the currency leaving
/// the pool always sums to `total`:
/// - fee in wei:   poolbase_fee + admin_fee + payout == total
/// - fee in token: poolbase_fee + payout == total (admin_fee is only credited)
pub fn split(
    total: i128,
    poolbase_fee: &FeeRatio,
    admin_fee: &FeeRatio,
    admin_fee_in_wei: bool,
) -> Result<FeeSplit, Error> {
    if total < 0 {
        return Err(Error::InvalidParams);
    }

    let poolbase = fee_amount(total, poolbase_fee)?;
    let admin = fee_amount(total, admin_fee)?;

    let mut payout = total.checked_sub(poolbase).ok_or(Error::Overflow)?;
    if admin_fee_in_wei {
        payout = payout.checked_sub(admin).ok_or(Error::Overflow)?;
    }
    if payout < 0 {
        return Err(Error::InvalidParams);
    }

    Ok(FeeSplit {
        poolbase_fee: poolbase,
        admin_fee: admin,
        payout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numerator: u32, denominator: u32) -> FeeRatio {
        FeeRatio {
            numerator,
            denominator,
        }
    }

    #[test]
    fn test_fee_amount_floors() {
        assert_eq!(fee_amount(10, &ratio(2, 5)).unwrap(), 4);
        assert_eq!(fee_amount(10, &ratio(1, 3)).unwrap(), 3);
        assert_eq!(fee_amount(7, &ratio(1, 2)).unwrap(), 3);
        assert_eq!(fee_amount(0, &ratio(1, 2)).unwrap(), 0);
    }

    #[test]
    fn test_fee_amount_zero_denominator() {
        assert_eq!(fee_amount(10, &ratio(1, 0)), Err(Error::InvalidParams));
    }

    #[test]
    fn test_fee_amount_overflow() {
        assert_eq!(fee_amount(i128::MAX, &ratio(2, 3)), Err(Error::Overflow));
    }

    #[test]
    fn test_split_admin_fee_in_wei() {
        // 10 units, poolbase 2/5, admin 1/2
        let split = split(10, &ratio(2, 5), &ratio(1, 2), true).unwrap();
        assert_eq!(split.poolbase_fee, 4);
        assert_eq!(split.admin_fee, 5);
        assert_eq!(split.payout, 1);
    }

    #[test]
    fn test_split_admin_fee_in_tokens() {
        let split = split(10, &ratio(2, 5), &ratio(1, 2), false).unwrap();
        assert_eq!(split.poolbase_fee, 4);
        assert_eq!(split.admin_fee, 5);
        assert_eq!(split.payout, 6);
    }

    #[test]
    fn test_split_conserves_total() {
        let ratios = [
            (ratio(2, 5), ratio(1, 2)),
            (ratio(1, 3), ratio(1, 3)),
            (ratio(1, 7), ratio(3, 11)),
            (ratio(0, 1), ratio(0, 1)),
            (ratio(1, 1), ratio(0, 9)),
            (ratio(33, 100), ratio(67, 100)),
        ];
        let totals = [0i128, 1, 2, 3, 7, 10, 99, 1_000_003, 123_456_789_012_345];

        for (poolbase, admin) in ratios.iter() {
            validate_ratios(poolbase, admin).unwrap();
            for total in totals.iter() {
                let s = split(*total, poolbase, admin, true).unwrap();
                assert_eq!(s.poolbase_fee + s.admin_fee + s.payout, *total);
                assert!(s.payout >= 0);

                let s = split(*total, poolbase, admin, false).unwrap();
                assert_eq!(s.poolbase_fee + s.payout, *total);
            }
        }
    }

    #[test]
    fn test_validate_ratios() {
        assert!(validate_ratios(&ratio(2, 5), &ratio(1, 2)).is_ok());
        assert!(validate_ratios(&ratio(1, 2), &ratio(1, 2)).is_ok());
        assert_eq!(
            validate_ratios(&ratio(1, 2), &ratio(2, 3)),
            Err(Error::InvalidParams)
        );
        assert_eq!(
            validate_ratios(&ratio(1, 0), &ratio(1, 2)),
            Err(Error::InvalidParams)
        );
        assert_eq!(
            validate_ratios(&ratio(3, 2), &ratio(0, 2)),
            Err(Error::InvalidParams)
        );
    }
}
